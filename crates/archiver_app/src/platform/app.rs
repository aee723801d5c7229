use std::io::{self, BufRead, Write};
use std::time::Duration;

use archiver_core::{stored_name, update, AppState, Effect, Msg, Screen, ARCHIVE_SUFFIX};
use archiver_engine::EngineHandle;
use archiver_logging::{archiver_debug, archiver_info};

use super::effects::{EffectRunner, Poll};
use super::ui::commands::{parse_command, Command};
use super::ui::constants::{HELP, NO_SELECTION, PROMPT_ARCHIVES, PROMPT_CREATE};
use super::ui::render::{render, render_scopes, viewer_link};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Line-oriented shell over the core state machine.
///
/// Each command is turned into messages; resulting effects run on the engine
/// and the shell waits for all of them to settle before prompting again.
pub struct ConsoleApp<R, W> {
    state: AppState,
    runner: EffectRunner,
    input: R,
    out: W,
    server: String,
}

impl<R: BufRead, W: Write> ConsoleApp<R, W> {
    pub fn new(engine: EngineHandle, server: impl Into<String>, input: R, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine),
            input,
            out,
            server: server.into(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Connected to {} (type 'help' for commands)", self.server)?;
        self.dispatch(Msg::Started)?;
        self.settle()?;

        loop {
            let prompt = match self.state.screen() {
                Screen::Archives => PROMPT_ARCHIVES,
                Screen::CreateArchive => PROMPT_CREATE,
            };
            write!(self.out, "{prompt}")?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let command = parse_command(&line);
            archiver_debug!("command {:?}", command);
            if command == Command::Quit {
                break;
            }
            self.handle_command(command)?;
            self.settle()?;
        }

        archiver_info!("shell closed");
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit | Command::Empty => {}
            Command::Refresh => self.dispatch(Msg::RefreshArchives)?,
            Command::List => self.render_now()?,
            Command::Search(query) => self.dispatch(Msg::SearchChanged(query))?,
            Command::Select(name) => {
                let name = self.resolve_archive(&name);
                self.dispatch(Msg::SelectArchive(name))?;
            }
            Command::Deselect => self.dispatch(Msg::SelectArchive(String::new()))?,
            Command::View => match self.state.view().viewer {
                Some(target) => writeln!(
                    self.out,
                    "{}",
                    viewer_link(&self.server, &target.viewer_url)
                )?,
                None => writeln!(self.out, "{NO_SELECTION}")?,
            },
            Command::Rename(name) => {
                let name = self.resolve_archive(&name);
                self.dispatch(Msg::StartRename(name))?;
            }
            Command::Set(value) => {
                if self.state.archives().editing().is_none() {
                    writeln!(self.out, "Not renaming anything; use 'rename <name>' first")?;
                } else {
                    self.dispatch(Msg::EditChanged(value))?;
                }
            }
            Command::Save => self.dispatch(Msg::CommitRename)?,
            Command::Cancel => self.dispatch(Msg::CancelRename)?,
            Command::Delete(name) => {
                let name = self.resolve_archive(&name);
                self.dispatch(Msg::RequestDelete(name))?;
            }
            Command::Jobs => {
                let open = !self.state.jobs().is_open();
                self.dispatch(Msg::JobsPanelToggled(open))?;
            }
            Command::JobsRefresh => self.dispatch(Msg::RefreshJobs)?,
            Command::New => self.dispatch(Msg::OpenCreateForm)?,
            Command::Field(field, value) => self.dispatch(Msg::FormFieldChanged(field, value))?,
            Command::Scopes => {
                for line in render_scopes() {
                    writeln!(self.out, "{line}")?;
                }
            }
            Command::Submit => self.dispatch(Msg::SubmitForm)?,
            Command::Back => self.dispatch(Msg::CloseCreateForm)?,
            Command::Dismiss => self.dispatch(Msg::DismissNotice)?,
            Command::Invalid(message) => writeln!(self.out, "{message}")?,
        }
        Ok(())
    }

    /// Maps user input to a stored archive name: a matching display name
    /// first, then an exact stored name, else the name with the suffix added.
    fn resolve_archive(&self, input: &str) -> String {
        if let Some(archives) = self.state.archives().archives() {
            if let Some(hit) = archives
                .iter()
                .find(|archive| archive.display_name() == input || archive.name == input)
            {
                return hit.name.clone();
            }
        }
        if input.ends_with(ARCHIVE_SUFFIX) {
            input.to_string()
        } else {
            stored_name(input)
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::ConfirmDelete { name } => {
                    let confirmed = self.confirm(&format!(
                        "Are you sure you want to delete {name}? [y/N] "
                    ))?;
                    let answer = if confirmed {
                        Msg::DeleteConfirmed
                    } else {
                        Msg::DeleteCancelled
                    };
                    self.dispatch(answer)?;
                }
                other => self.runner.execute(other),
            }
        }

        if self.state.consume_dirty() {
            self.render_now()?;
        }
        Ok(())
    }

    /// Applies engine results until nothing is in flight.
    fn settle(&mut self) -> io::Result<()> {
        while self.runner.in_flight() > 0 {
            match self.runner.poll(POLL_INTERVAL) {
                Poll::Msg(msg) => self.dispatch(msg)?,
                Poll::Pending => {}
                Poll::Disconnected => {
                    writeln!(self.out, "! Connection to the request engine was lost")?;
                    break;
                }
            }
        }
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn render_now(&mut self) -> io::Result<()> {
        for line in render(&self.state.view(), &self.server) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}
