//! Text menu driving `StudentService`.
//!
//! # Invariants
//! - Unparseable input never reaches the service.
//! - Store errors are shown to the operator and the loop keeps running.
//! - End of input exits the loop cleanly.

use log::{info, warn};
use std::io::{self, BufRead, Write};
use studentdb_core::{StudentDto, StudentId, StudentRepository, StudentService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    List,
    Add,
    Edit,
    Delete,
    View,
    Exit,
}

fn parse_choice(line: &str) -> Option<MenuChoice> {
    match line.trim().parse::<u8>().ok()? {
        1 => Some(MenuChoice::List),
        2 => Some(MenuChoice::Add),
        3 => Some(MenuChoice::Edit),
        4 => Some(MenuChoice::Delete),
        5 => Some(MenuChoice::View),
        6 => Some(MenuChoice::Exit),
        _ => None,
    }
}

fn parse_id(line: &str) -> Option<StudentId> {
    line.trim().parse().ok()
}

struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Prints `prompt` and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Asks for an id; prints a hint and returns `None` when it is not a number.
    fn ask_id(&mut self, prompt: &str) -> io::Result<Option<StudentId>> {
        let Some(line) = self.ask(prompt)? else {
            return Ok(None);
        };
        match parse_id(&line) {
            Some(id) => Ok(Some(id)),
            None => {
                warn!("event=invalid_input module=cli field=id");
                self.say("Please enter a valid number.")?;
                Ok(None)
            }
        }
    }
}

/// Runs the menu until the operator exits or input ends.
pub fn run<R, I, O>(service: &StudentService<R>, input: I, output: O) -> io::Result<()>
where
    R: StudentRepository,
    I: BufRead,
    O: Write,
{
    let mut console = Console { input, output };

    loop {
        console.say("\n=== Student Management ===")?;
        console.say("1. List all students")?;
        console.say("2. Add student")?;
        console.say("3. Edit student")?;
        console.say("4. Delete student")?;
        console.say("5. View student")?;
        console.say("6. Exit")?;

        let Some(line) = console.ask("Choose an option: ")? else {
            console.say("Goodbye!")?;
            return Ok(());
        };

        match parse_choice(&line) {
            Some(MenuChoice::List) => list_students(service, &mut console)?,
            Some(MenuChoice::Add) => add_student(service, &mut console)?,
            Some(MenuChoice::Edit) => edit_student(service, &mut console)?,
            Some(MenuChoice::Delete) => delete_student(service, &mut console)?,
            Some(MenuChoice::View) => view_student(service, &mut console)?,
            Some(MenuChoice::Exit) => {
                info!("event=menu_exit module=cli status=ok");
                console.say("Goodbye!")?;
                return Ok(());
            }
            None => {
                warn!("event=invalid_input module=cli field=menu_option");
                console.say("Please enter a number between 1 and 6.")?;
            }
        }
    }
}

fn report_error<O: Write>(output: &mut O, err: &dyn std::error::Error) -> io::Result<()> {
    warn!("event=store_error module=cli status=error error={}", err);
    writeln!(output, "Error: {err}")
}

fn list_students<R: StudentRepository, I: BufRead, O: Write>(
    service: &StudentService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()> {
    let students = match service.list_all() {
        Ok(students) => students,
        Err(err) => return report_error(&mut console.output, &err),
    };

    console.say("\n--- Students ---")?;
    if students.is_empty() {
        return console.say("No students found.");
    }
    for student in &students {
        console.say(format!(
            "{}. {} ({})",
            student.id.unwrap_or_default(),
            student.full_name(),
            student.email
        ))?;
    }
    Ok(())
}

fn add_student<R: StudentRepository, I: BufRead, O: Write>(
    service: &StudentService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()> {
    let Some(first_name) = console.ask("First name: ")? else {
        return Ok(());
    };
    let Some(last_name) = console.ask("Last name: ")? else {
        return Ok(());
    };
    let Some(email) = console.ask("Email: ")? else {
        return Ok(());
    };

    let mut dto = StudentDto::new(first_name, last_name, email);
    match service.create(&mut dto) {
        Ok(id) => console.say(format!("Student added with ID {id}.")),
        Err(err) => report_error(&mut console.output, &err),
    }
}

fn edit_student<R: StudentRepository, I: BufRead, O: Write>(
    service: &StudentService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()> {
    let Some(id) = console.ask_id("ID of the student to edit: ")? else {
        return Ok(());
    };

    let mut student = match service.get_by_id(id) {
        Ok(Some(student)) => student,
        Ok(None) => return console.say("Student not found."),
        Err(err) => return report_error(&mut console.output, &err),
    };

    // Blank input keeps the current value.
    let fields = [
        ("New first name", &mut student.first_name),
        ("New last name", &mut student.last_name),
        ("New email", &mut student.email),
    ];
    for (label, value) in fields {
        let Some(answer) = console.ask(&format!("{label} ({value}): "))? else {
            return Ok(());
        };
        if !answer.is_empty() {
            *value = answer;
        }
    }

    match service.update(&student) {
        Ok(true) => console.say("Student updated."),
        Ok(false) => console.say("Student not found."),
        Err(err) => report_error(&mut console.output, &err),
    }
}

fn delete_student<R: StudentRepository, I: BufRead, O: Write>(
    service: &StudentService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()> {
    let Some(id) = console.ask_id("ID of the student to delete: ")? else {
        return Ok(());
    };

    match service.delete(id) {
        Ok(true) => console.say("Student deleted."),
        Ok(false) => console.say("Student not found."),
        Err(err) => report_error(&mut console.output, &err),
    }
}

fn view_student<R: StudentRepository, I: BufRead, O: Write>(
    service: &StudentService<R>,
    console: &mut Console<I, O>,
) -> io::Result<()> {
    let Some(id) = console.ask_id("ID of the student to view: ")? else {
        return Ok(());
    };

    match service.get_by_id(id) {
        Ok(Some(student)) => {
            console.say("\n--- Student Details ---")?;
            console.say(format!("ID: {id}"))?;
            console.say(format!("Name: {}", student.full_name()))?;
            console.say(format!("Email: {}", student.email))
        }
        Ok(None) => console.say("Student not found."),
        Err(err) => report_error(&mut console.output, &err),
    }
}
