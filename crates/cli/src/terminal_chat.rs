use std::io::{self, Write};

use chatreport_core::domain::{
    conversation::{Conversation, Speaker},
    questionnaire::{Answers, BodyRegion, Questionnaire, Step, StepKind},
};
use chrono::Local;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Runs the check-in on a terminal: bot messages are printed, answers are read line by line.
///
/// Quick replies and body regions can be picked by their number.
pub struct TerminalChat<'q, R, W> {
    questionnaire: &'q Questionnaire,
    input: R,
    output: W,
}

impl<'q, R, W> TerminalChat<'q, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(questionnaire: &'q Questionnaire, input: R, output: W) -> Self {
        Self {
            questionnaire,
            input,
            output,
        }
    }

    /// Returns the answers once every question was answered, or `None` when input ends early.
    pub async fn run(&mut self) -> io::Result<Option<Answers>> {
        let mut conversation = Conversation::start(self.questionnaire);
        let mut shown = 0;

        loop {
            shown = self.print_new_messages(&conversation, shown)?;
            let Some(step) = conversation.current_step() else {
                break;
            };
            self.print_prompt(step, conversation.progress_percent())?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                writeln!(self.output, "\nCheck-in cancelled, nothing was sent.")?;
                return Ok(None);
            }

            if let Err(err) = conversation.answer(&expand_shortcuts(step, &line)) {
                writeln!(self.output, "⚠️  {err}")?;
            }
        }

        if let Some(report) = conversation.report(Local::now()) {
            writeln!(self.output, "\n{report}")?;
        }
        self.output.flush()?;

        Ok(Some(conversation.answers().clone()))
    }

    fn print_new_messages(
        &mut self,
        conversation: &Conversation,
        shown: usize,
    ) -> io::Result<usize> {
        let messages = conversation.messages();
        for message in messages[shown..]
            .iter()
            .filter(|message| message.speaker == Speaker::Bot)
        {
            writeln!(
                self.output,
                "\n🩺 ChatReport ({})\n{}",
                message.timestamp(),
                message.text.replace("**", "")
            )?;
        }
        Ok(messages.len())
    }

    fn print_prompt(&mut self, step: &Step, progress: u8) -> io::Result<()> {
        match step.kind {
            StepKind::Choice(options) => {
                for (number, option) in options.iter().enumerate() {
                    writeln!(self.output, "  [{}] {}", number + 1, option)?;
                }
            }
            StepKind::Scale => writeln!(self.output, "  (0-10)")?,
            StepKind::BodyMap => {
                for (number, region) in BodyRegion::iter().enumerate() {
                    writeln!(self.output, "  [{:>2}] {}", number + 1, region.label())?;
                }
                writeln!(
                    self.output,
                    "  Separate several areas with commas; leave blank to skip."
                )?;
            }
            StepKind::Text | StepKind::Info => {}
        }
        write!(self.output, "{progress:>3}% > ")?;
        self.output.flush()
    }
}

/// Replaces option numbers with the option text for quick replies and body regions.
fn expand_shortcuts(step: &Step, line: &str) -> String {
    let raw = line.trim();
    match step.kind {
        StepKind::Choice(options) => {
            pick(raw, options.iter().copied()).unwrap_or(raw).to_string()
        }
        StepKind::BodyMap => raw
            .split(',')
            .map(str::trim)
            .map(|token| {
                pick(token, BodyRegion::iter().map(|region| region.label())).unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => raw.to_string(),
    }
}

fn pick<'a>(token: &str, mut options: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let number = token.parse::<usize>().ok()?;
    options.nth(number.checked_sub(1)?)
}
