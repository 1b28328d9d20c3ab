use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use urbanroot_auth::{EnrollmentFlow, Field, FlowMode, Step};
use urbanroot_catalog::{greeting, SystemClock};
use urbanroot_runtime::ClientServices;

use crate::output::Output;

/// One line typed at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Value(String),
    Back,
    Resend,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":back" | ":b" => Input::Back,
            ":resend" | ":r" => Input::Resend,
            ":quit" | ":q" | ":exit" => Input::Quit,
            _ => Input::Value(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> Result<Input> {
        print!("{label}: ");
        std::io::Write::flush(&mut std::io::stdout())?;

        match self.lines.next_line().await? {
            Some(line) => Ok(Input::parse(&line)),
            None => Ok(Input::Quit), // EOF
        }
    }
}

/// Drive one signup or login flow from the terminal until it completes or the user quits.
pub async fn run(services: &ClientServices, mode: FlowMode, output: Output) -> Result<()> {
    let mut flow = services.flow(mode);
    let mut prompt = Prompt::stdin();
    let mut revisit = false;

    match mode {
        FlowMode::Signup => println!("UrbanRoot signup"),
        FlowMode::Login => println!("UrbanRoot login"),
    }
    println!("Commands: ':back' to edit your details, ':resend' for a new code, ':quit' to exit");
    println!("---");

    loop {
        match flow.session().step() {
            Step::Details => {
                if !fill_details(&mut flow, &mut prompt, revisit).await? {
                    return Ok(());
                }
                revisit = false;
                let notification = flow.submit_details().await?;
                output.notification(&notification)?;
            }
            Step::AwaitingCode => match prompt.ask("Verification code").await? {
                Input::Quit => return Ok(()),
                Input::Back => {
                    flow.go_back()?;
                    revisit = true;
                    println!("Back to your details. Press enter to keep a value.");
                }
                Input::Resend => output.notification(&flow.resend_code()?)?,
                Input::Value(code) => {
                    flow.set_code(code.trim())?;
                    let notification = flow.submit_code().await?;
                    output.notification(&notification)?;
                }
            },
            Step::Completed => break,
        }
    }

    if let Some(identity) = flow.into_identity() {
        output.identity(&identity, greeting(&SystemClock))?;
    }
    Ok(())
}

/// Prompt for the fields that still need input. Returns `false` when the user quits.
///
/// On the first pass every empty field is asked for; after a rejection only
/// the fields with errors are. With `revisit` set every field is offered again.
async fn fill_details(flow: &mut EnrollmentFlow, prompt: &mut Prompt, revisit: bool) -> Result<bool> {
    let mode = flow.session().mode();

    for &field in mode.fields() {
        let session = flow.session();
        let current = session.credentials().get(field).to_string();
        let needs_input =
            revisit || current.is_empty() || session.errors().contains(field);
        if !needs_input {
            continue;
        }

        let label = field_label(field, &current);
        loop {
            match prompt.ask(&label).await? {
                Input::Quit => return Ok(false),
                Input::Back | Input::Resend => {
                    println!("Nothing to do here yet; fill in your details first.");
                }
                Input::Value(value) if value.is_empty() && !current.is_empty() => break,
                Input::Value(value) => {
                    flow.set_field(field, value)?;
                    break;
                }
            }
        }
    }

    Ok(true)
}

fn field_label(field: Field, current: &str) -> String {
    if current.is_empty() {
        field.label().to_string()
    } else if field.is_secret() {
        format!("{} [{}]", field.label(), "*".repeat(current.chars().count()))
    } else {
        format!("{} [{current}]", field.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_recognised() {
        assert_eq!(Input::parse(":back"), Input::Back);
        assert_eq!(Input::parse(" :resend "), Input::Resend);
        assert_eq!(Input::parse(":q"), Input::Quit);
    }

    #[test]
    fn values_keep_inner_whitespace() {
        assert_eq!(
            Input::parse("Jane Doe  "),
            Input::Value("Jane Doe  ".to_string())
        );
    }

    #[test]
    fn secret_fields_are_masked_in_labels() {
        assert_eq!(field_label(Field::Password, "abc123"), "Password [******]");
        assert_eq!(field_label(Field::Email, "a@b.co"), "Email [a@b.co]");
        assert_eq!(field_label(Field::Name, ""), "Full Name");
    }
}
