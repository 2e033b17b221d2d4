use crate::display::{self, EMPTY_ROSTER, NOT_FOUND};
use crate::input::Prompt;
use anyhow::{Result, anyhow};
use colored::Colorize;
use roster_core::{Field, FieldUpdate, Roster, RosterError, validation};
use std::time::Instant;
use tracing::debug;

/// Command dispatcher over one open roster
pub struct Session {
    roster: Roster,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn execute_command(
        &mut self,
        command: &str,
        args: &[String],
        prompt: &mut dyn Prompt,
    ) -> Result<String> {
        let start = Instant::now();
        debug!("Executing {} with {} args", command, args.len());

        let response = match command.to_uppercase().as_str() {
            "ADD" | "1" => self.cmd_add(args, prompt)?,
            "LIST" | "DISPLAY" | "2" => self.cmd_list(args)?,
            "SEARCH" | "GET" | "3" => self.cmd_search(args, prompt)?,
            "UPDATE" | "4" => self.cmd_update(args, prompt)?,
            "DELETE" | "DEL" | "5" => self.cmd_delete(args, prompt)?,
            "COUNT" => format!("(integer) {}", self.roster.len()),
            "SAVE" => self.cmd_save()?,
            "HELP" => self.help_text(),
            _ => return Err(anyhow!("Unknown command: {}", command)),
        };

        let elapsed = start.elapsed();
        Ok(format!(
            "{}\n{}",
            response,
            format!("({:.2?})", elapsed).dimmed()
        ))
    }

    fn cmd_add(&mut self, args: &[String], prompt: &mut dyn Prompt) -> Result<String> {
        let (name, roll_no, department, marks, contact) = match args {
            [] => match self.collect_new_student(prompt)? {
                Some(fields) => fields,
                None => return Ok(cancelled()),
            },
            [name, roll_no, department, marks, contact] => (
                name.clone(),
                roll_no.clone(),
                department.clone(),
                validation::parse_marks(marks)?,
                contact.clone(),
            ),
            _ => return Err(anyhow!("Usage: ADD [name roll dept marks contact]")),
        };

        let student = self
            .roster
            .add(&name, &roll_no, &department, marks, &contact)
            .map_err(report)?;

        Ok(format!(
            "{} (grade {})",
            "Student added successfully!".green(),
            student.grade()
        ))
    }

    /// Ask for each field in turn, asking again until the value is accepted
    fn collect_new_student(
        &self,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<(String, String, String, f64, String)>> {
        prompt.say("Enter Student Details");

        let Some(name) = ask_until(prompt, "Name: ", |value| {
            validation::validate_text(Field::Name, value)
                .map(|_| value.to_string())
                .map_err(|e| e.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(roll_no) = ask_until(prompt, "Roll No: ", |value| {
            validation::validate_text(Field::RollNo, value).map_err(|e| e.to_string())?;
            if self.roster.find(value).is_some() {
                return Err("Roll No already exists! Try again.".to_string());
            }
            Ok(value.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(department) = ask_until(prompt, "Department: ", |value| {
            validation::validate_text(Field::Department, value)
                .map(|_| value.to_string())
                .map_err(|e| e.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(marks) = ask_until(prompt, "Marks (0-100): ", |value| {
            validation::parse_marks(value)
                .map_err(|_| "Invalid marks! Please enter marks between 0 and 100.".to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(contact) = ask_until(prompt, "Contact (10 digits): ", |value| {
            validation::validate_contact(value)
                .map(|_| value.to_string())
                .map_err(|_| "Invalid contact number! Please enter 10 digits.".to_string())
        })?
        else {
            return Ok(None);
        };

        Ok(Some((name, roll_no, department, marks, contact)))
    }

    fn cmd_list(&self, args: &[String]) -> Result<String> {
        match args {
            [] => Ok(display::render_table(self.roster.list_all())),
            [flag] if flag == "--json" => Ok(serde_json::to_string_pretty(self.roster.list_all())?),
            _ => Err(anyhow!("Usage: LIST [--json]")),
        }
    }

    fn cmd_search(&self, args: &[String], prompt: &mut dyn Prompt) -> Result<String> {
        if self.roster.is_empty() {
            return Ok(EMPTY_ROSTER.yellow().to_string());
        }

        let Some(roll_no) = roll_no_arg(args, prompt, "Enter Roll No to search: ")? else {
            return Ok(cancelled());
        };

        match self.roster.get(&roll_no) {
            Some(student) => Ok(display::render_detail(student)),
            None => Ok(NOT_FOUND.yellow().to_string()),
        }
    }

    fn cmd_update(&mut self, args: &[String], prompt: &mut dyn Prompt) -> Result<String> {
        if self.roster.is_empty() {
            return Ok(EMPTY_ROSTER.yellow().to_string());
        }

        let Some(roll_no) = roll_no_arg(args, prompt, "Enter Roll No to update: ")? else {
            return Ok(cancelled());
        };

        if self.roster.find(&roll_no).is_none() {
            if args.is_empty() {
                return Ok(NOT_FOUND.yellow().to_string());
            }
            return Err(report(RosterError::NotFound(roll_no)));
        }

        if args.len() >= 3 {
            let field: Field = args[1].parse().map_err(report)?;
            let change = field_update(field, &args[2..].join(" "))?;
            let student = self.roster.update(&roll_no, change).map_err(report)?;
            return Ok(format!(
                "{} (grade {})",
                "Student information updated successfully!".green(),
                student.grade()
            ));
        }
        if args.len() == 2 {
            return Err(anyhow!("Usage: UPDATE roll [field value]"));
        }

        self.update_menu(&roll_no, prompt)
    }

    /// Field menu loop: apply one change per choice until "Go Back".
    ///
    /// A change whose save fails stays in memory and the menu carries on.
    fn update_menu(&mut self, roll_no: &str, prompt: &mut dyn Prompt) -> Result<String> {
        let mut changes = 0;
        let mut unsaved = 0;

        loop {
            prompt.say(
                "What would you like to update?\n1. Name\n2. Department\n3. Marks\n4. Contact\n5. Go Back",
            );
            let Some(choice) = prompt.ask("Enter your choice: ")? else {
                break;
            };

            let (field, label) = match choice.trim() {
                "1" => (Field::Name, "Enter new name: "),
                "2" => (Field::Department, "Enter new department: "),
                "3" => (Field::Marks, "Enter new marks (0-100): "),
                "4" => (Field::Contact, "Enter new contact (10 digits): "),
                "5" => break,
                _ => {
                    prompt.warn("Invalid choice!");
                    continue;
                }
            };

            loop {
                let Some(value) = prompt.ask(label)? else {
                    break;
                };
                let change = match field_update(field, &value) {
                    Ok(change) => change,
                    Err(e) => {
                        prompt.warn(&e.to_string());
                        continue;
                    }
                };
                match self.roster.update(roll_no, change) {
                    Ok(_) => {
                        changes += 1;
                        break;
                    }
                    Err(RosterError::Validation(e)) => prompt.warn(&e.to_string()),
                    Err(e) if e.needs_save() => {
                        prompt.warn(&report(e).to_string());
                        changes += 1;
                        unsaved += 1;
                        break;
                    }
                    Err(e) => return Err(report(e)),
                }
            }
        }

        if unsaved > 0 {
            Err(anyhow!(
                "{} of {} change(s) kept in memory only; run SAVE to retry",
                unsaved,
                changes
            ))
        } else if changes == 0 {
            Ok("No changes made.".dimmed().to_string())
        } else {
            Ok("Student information updated successfully!"
                .green()
                .to_string())
        }
    }

    fn cmd_delete(&mut self, args: &[String], prompt: &mut dyn Prompt) -> Result<String> {
        if self.roster.is_empty() {
            return Ok(EMPTY_ROSTER.yellow().to_string());
        }

        let assume_yes = args.iter().any(|a| a == "-y" || a == "--yes");
        let positional: Vec<String> = args
            .iter()
            .filter(|a| *a != "-y" && *a != "--yes")
            .cloned()
            .collect();
        if positional.len() > 1 {
            return Err(anyhow!("Usage: DELETE roll [-y|--yes]"));
        }

        let Some(roll_no) = roll_no_arg(&positional, prompt, "Enter Roll No to delete: ")? else {
            return Ok(cancelled());
        };

        let Some(student) = self.roster.get(&roll_no) else {
            if positional.is_empty() {
                return Ok(NOT_FOUND.yellow().to_string());
            }
            return Err(report(RosterError::NotFound(roll_no)));
        };

        if !assume_yes {
            let question = format!(
                "Are you sure you want to delete student {}? (y/n): ",
                student.name()
            );
            let answer = prompt.ask(&question)?.unwrap_or_default();
            if !matches!(answer.trim().chars().next(), Some('y') | Some('Y')) {
                return Ok(cancelled());
            }
        }

        self.roster.delete(&roll_no).map_err(report)?;
        Ok("Student deleted successfully!".green().to_string())
    }

    fn cmd_save(&self) -> Result<String> {
        self.roster.save().map_err(report)?;
        Ok("OK".green().to_string())
    }

    fn help_text(&self) -> String {
        format!(
            r#"{}

{}
  ADD [name roll dept marks contact]   Add a student (prompts when no arguments)
  LIST [--json]                        Display all students (alias: DISPLAY)
  SEARCH roll                          Show one student (alias: GET)
  UPDATE roll [field value]            Update name, dept, marks or contact
  DELETE roll [-y|--yes]               Delete a student after confirmation

{}
  COUNT                                Number of students
  SAVE                                 Rewrite the data file from memory

{}
  1-5                                  Menu numbers for ADD, LIST, SEARCH, UPDATE, DELETE
  HELP                                 Show this help message
  QUIT / EXIT / 6                      Exit the CLI

Quote values containing spaces: ADD "Alice Smith" R1 "Computer Science" 95 1234567890
"#,
            "Roster CLI - Available Commands".bold().cyan(),
            "Record Commands:".bold(),
            "Storage Commands:".bold(),
            "Session Commands:".bold(),
        )
    }
}

/// Repeatedly ask until `check` accepts the answer; `None` on cancel
fn ask_until<T>(
    prompt: &mut dyn Prompt,
    label: &str,
    mut check: impl FnMut(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    loop {
        let Some(value) = prompt.ask(label)? else {
            return Ok(None);
        };
        match check(&value) {
            Ok(accepted) => return Ok(Some(accepted)),
            Err(message) => prompt.warn(&message),
        }
    }
}

fn roll_no_arg(args: &[String], prompt: &mut dyn Prompt, label: &str) -> Result<Option<String>> {
    match args.first() {
        Some(roll_no) => Ok(Some(roll_no.clone())),
        None => prompt.ask(label),
    }
}

fn field_update(field: Field, value: &str) -> Result<FieldUpdate> {
    let change = match field {
        Field::Name => FieldUpdate::Name(value.to_string()),
        Field::Department => FieldUpdate::Department(value.to_string()),
        Field::Marks => FieldUpdate::Marks(validation::parse_marks(value)?),
        Field::Contact => FieldUpdate::Contact(value.to_string()),
        Field::RollNo => return Err(report(RosterError::ReadOnlyField(field))),
    };
    Ok(change)
}

/// Attach the SAVE hint to errors that left unsaved changes behind
fn report(err: RosterError) -> anyhow::Error {
    if err.needs_save() {
        anyhow!("{} (changes kept in memory; run SAVE to retry)", err)
    } else {
        anyhow!(err)
    }
}

fn cancelled() -> String {
    "Cancelled.".dimmed().to_string()
}
