use colored::Colorize;
use roster_core::Student;

pub const EMPTY_ROSTER: &str = "No students in database!";
pub const NOT_FOUND: &str = "Student not found!";

const RULE_WIDTH: usize = 80;

/// Fixed-width table of all records
pub fn render_table(students: &[Student]) -> String {
    if students.is_empty() {
        return EMPTY_ROSTER.yellow().to_string();
    }

    let mut lines = Vec::with_capacity(students.len() + 3);
    lines.push("Student Details:".bold().to_string());
    lines.push(
        format!(
            "{:<20}{:<10}{:<15}{:<10}{:<10}{:<15}",
            "Name", "Roll No", "Department", "Marks", "Grade", "Contact"
        )
        .bold()
        .to_string(),
    );
    lines.push("-".repeat(RULE_WIDTH));

    for student in students {
        lines.push(format!(
            "{:<20}{:<10}{:<15}{:<10}{:<10}{:<15}",
            student.name(),
            student.roll_no(),
            student.department(),
            student.marks(),
            student.grade(),
            student.contact()
        ));
    }

    lines.join("\n")
}

/// Field-per-line view of one record
pub fn render_detail(student: &Student) -> String {
    [
        "Student Details:".bold().to_string(),
        format!("Name: {}", student.name()),
        format!("Roll No: {}", student.roll_no()),
        format!("Department: {}", student.department()),
        format!("Marks: {}", student.marks()),
        format!("Grade: {}", student.grade()),
        format!("Contact: {}", student.contact()),
    ]
    .join("\n")
}
