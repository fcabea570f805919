use crate::core::FieldId;
use crate::error::{FormError, SubmitError};
use crate::form::{Advance, Completion, StepwiseForm};
use crate::gateway::AuthGateway;
use crate::state::step::FieldKind;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const BACK: &str = ":back";
const QUIT: &str = ":quit";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverOutcome {
    Completed(Completion),
    Quit,
}

enum Line {
    Value(String),
    Back,
    Quit,
}

/// Line-oriented prompt loop over any reader/writer pair.
pub struct Driver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run<G>(
        &mut self,
        form: &mut StepwiseForm,
        gateway: &G,
    ) -> Result<DriverOutcome, DriverError>
    where
        G: AuthGateway + ?Sized,
    {
        let mut retry_only = false;

        loop {
            let index = form.current_step_index();
            self.print_step_header(form)?;

            if retry_only {
                match self.prompt("Press enter to retry, :back to edit, :quit to leave")? {
                    Line::Quit => return Ok(DriverOutcome::Quit),
                    Line::Back => {
                        retry_only = false;
                        continue;
                    }
                    Line::Value(_) => {}
                }
            } else {
                let pending = fields_to_prompt(form, index);
                let mut went_back = false;
                for id in pending {
                    match self.prompt_field(form, &id)? {
                        Line::Quit => return Ok(DriverOutcome::Quit),
                        Line::Back => {
                            form.retreat()?;
                            went_back = true;
                            break;
                        }
                        Line::Value(_) => {}
                    }
                }
                if went_back {
                    continue;
                }
            }
            retry_only = false;

            if !form.is_final_step() {
                if form.advance()? == Advance::Blocked {
                    self.print_errors(form, index)?;
                }
                continue;
            }

            writeln!(self.output, "Submitting...")?;
            match form.submit(gateway).await {
                Ok(completion) => {
                    if let Some(notification) = form.notification() {
                        writeln!(self.output, "{}", notification.message)?;
                    }
                    return Ok(DriverOutcome::Completed(completion));
                }
                Err(SubmitError::Invalid { .. }) => self.print_errors(form, index)?,
                Err(SubmitError::Rejected(err)) => {
                    writeln!(self.output, "  ! {err}")?;
                    retry_only = true;
                }
                Err(SubmitError::Form(err)) => return Err(err.into()),
            }
        }
    }

    fn prompt_field(&mut self, form: &mut StepwiseForm, id: &FieldId) -> Result<Line, DriverError> {
        let Some(field) = form.flow().field(id.as_str()) else {
            return Err(FormError::UnknownField(id.clone()).into());
        };
        let kind = field.kind.clone();
        let mut label = field.label.clone();
        match &kind {
            FieldKind::Choice(options) => {
                for (n, option) in options.iter().enumerate() {
                    writeln!(self.output, "    {}. {option}", n + 1)?;
                }
            }
            FieldKind::Toggle => label.push_str(" (y/n)"),
            _ => {}
        }

        let line = self.prompt(&label)?;
        if let Line::Value(raw) = &line {
            form.update_field(id.as_str(), kind.parse_input(raw))?;
            form.blur_field(id.as_str())?;
            if let Some(message) = form.error(id.as_str()) {
                writeln!(self.output, "  ! {message}")?;
            }
        }
        Ok(line)
    }

    fn prompt(&mut self, label: &str) -> Result<Line, DriverError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(Line::Quit);
        }
        let raw = buf.trim_end_matches(['\r', '\n']);
        Ok(match raw.trim() {
            BACK => Line::Back,
            QUIT => Line::Quit,
            _ => Line::Value(raw.to_string()),
        })
    }

    fn print_step_header(&mut self, form: &StepwiseForm) -> io::Result<()> {
        let Some(step) = form.current_step() else {
            return Ok(());
        };
        writeln!(
            self.output,
            "\n[{}/{}] {}",
            form.current_step_index() + 1,
            form.step_count(),
            step.title
        )?;
        if let Some(description) = &step.description {
            writeln!(self.output, "{description}")?;
        }
        Ok(())
    }

    fn print_errors(&mut self, form: &StepwiseForm, index: usize) -> io::Result<()> {
        let Some(step) = form.flow().step_at(index) else {
            return Ok(());
        };
        for field in &step.fields {
            if let Some(message) = form.error(field.id.as_str()) {
                writeln!(self.output, "  ! {}: {message}", field.label)?;
            }
        }
        for message in form.errors().step_errors() {
            writeln!(self.output, "  ! {message}")?;
        }
        Ok(())
    }
}

/// Fields with recorded errors if the step has any, otherwise every field.
fn fields_to_prompt(form: &StepwiseForm, index: usize) -> Vec<FieldId> {
    let Some(step) = form.flow().step_at(index) else {
        return Vec::new();
    };
    let failing: Vec<FieldId> = step
        .field_ids()
        .filter(|id| form.error(id.as_str()).is_some())
        .cloned()
        .collect();
    if failing.is_empty() {
        step.field_ids().cloned().collect()
    } else {
        failing
    }
}
