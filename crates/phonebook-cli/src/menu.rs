//! Interactive numbered menu over any line-oriented input and output.

use std::io::{self, BufRead, Write};

use crossterm::{
  cursor::MoveTo,
  execute,
  terminal::{Clear, ClearType},
};
use phonebook_core::{
  ContactInput, ContactRepository, ContactUsecase, Error, contact::parse_id,
};

const MENU: &str = "\
Contact book
  1. List contacts
  2. Add a contact
  3. Contact detail
  4. Update a contact
  5. Delete a contact
  6. Exit
";

const RULE: &str = "+--------+--------------------------+----------------------+";

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
  #[error("invalid menu selection: {0:?}")]
  InvalidSelection(String),

  #[error("terminal i/o error: {0}")]
  Io(#[from] io::Error),
}

/// The read-evaluate loop. Blocks on `input` between commands.
pub struct Menu<'a, R, I, O> {
  usecase: &'a ContactUsecase<R>,
  input:   I,
  out:     O,
  clear:   bool,
}

impl<'a, R, I, O> Menu<'a, R, I, O>
where
  R: ContactRepository,
  I: BufRead,
  O: Write,
{
  pub fn new(usecase: &'a ContactUsecase<R>, input: I, out: O) -> Self {
    Self { usecase, input, out, clear: false }
  }

  /// Clear the terminal before the menu and before each command.
  pub fn clear_screen(mut self, clear: bool) -> Self {
    self.clear = clear;
    self
  }

  pub fn into_output(self) -> O { self.out }

  /// Run until the user picks Exit or input ends.
  ///
  /// A blank line redisplays the menu, as does any number outside 1–6.
  /// Anything that is not a number ends the loop with
  /// [`MenuError::InvalidSelection`].
  pub async fn run(&mut self) -> Result<(), MenuError> {
    self.show_menu()?;

    while let Some(line) = self.read_line()? {
      let line = line.trim();
      if line.is_empty() {
        self.show_menu()?;
        continue;
      }

      let choice: i32 = line
        .parse()
        .map_err(|_| MenuError::InvalidSelection(line.to_owned()))?;

      match choice {
        1 => self.list().await?,
        2 => self.add().await?,
        3 => self.detail().await?,
        4 => self.update().await?,
        5 => self.delete().await?,
        6 => {
          self.clear()?;
          break;
        }
        _ => self.show_menu()?,
      }
    }

    Ok(())
  }

  // ── Commands ────────────────────────────────────────────────────────────────

  async fn list(&mut self) -> io::Result<()> {
    self.clear()?;
    writeln!(self.out, "Contact list")?;

    let contacts = match self.usecase.list().await {
      Ok(contacts) => contacts,
      Err(e) => return self.report(&e),
    };

    writeln!(self.out, "{RULE}")?;
    writeln!(self.out, "| {:<6} | {:<24} | {:<20} |", "ID", "Name", "Phone")?;
    writeln!(self.out, "{RULE}")?;
    for c in &contacts {
      writeln!(self.out, "| {:<6} | {:<24} | {:<20} |", c.id, c.name, c.phone)?;
    }
    writeln!(self.out, "{RULE}")?;
    self.out.flush()
  }

  async fn add(&mut self) -> io::Result<()> {
    self.clear()?;
    writeln!(self.out, "Add a new contact")?;

    let Some(input) = self.prompt_input()? else { return Ok(()) };
    match self.usecase.add(input).await {
      Ok(contact) => writeln!(self.out, "Added contact with id {}", contact.id),
      Err(e) => self.report(&e),
    }
  }

  async fn detail(&mut self) -> io::Result<()> {
    self.clear()?;
    writeln!(self.out, "Contact detail")?;

    let Some(id) = self.prompt_id("Contact ID = ")? else { return Ok(()) };
    match self.usecase.detail(id).await {
      Ok(c) => writeln!(
        self.out,
        "ID    : {}\nName  : {}\nPhone : {}",
        c.id, c.name, c.phone
      ),
      Err(e) => self.report(&e),
    }
  }

  async fn update(&mut self) -> io::Result<()> {
    self.clear()?;
    writeln!(self.out, "Update a contact")?;

    let Some(id) = self.prompt_id("ID = ")? else { return Ok(()) };
    let Some(input) = self.prompt_input()? else { return Ok(()) };
    match self.usecase.update(id, input).await {
      Ok(contact) => writeln!(self.out, "Updated contact with id {}", contact.id),
      Err(e) => self.report(&e),
    }
  }

  async fn delete(&mut self) -> io::Result<()> {
    self.clear()?;
    writeln!(self.out, "Delete a contact")?;

    let Some(id) = self.prompt_id("ID = ")? else { return Ok(()) };
    match self.usecase.delete(id).await {
      Ok(()) => writeln!(self.out, "Deleted contact with id {id}"),
      Err(e) => self.report(&e),
    }
  }

  // ── Prompts ─────────────────────────────────────────────────────────────────

  /// Ask for a contact id. Prints the validation error and returns `None`
  /// if the answer is not a positive integer.
  fn prompt_id(&mut self, label: &str) -> io::Result<Option<i64>> {
    let raw = self.prompt(label)?;
    match parse_id(&raw) {
      Ok(id) => Ok(Some(id)),
      Err(e) => self.report(&e).map(|()| None),
    }
  }

  /// Ask for name then phone, stopping at the first empty answer.
  fn prompt_input(&mut self) -> io::Result<Option<ContactInput>> {
    let name = self.prompt("Name = ")?;
    if name.is_empty() {
      return self.report(&Error::InvalidName).map(|()| None);
    }
    let phone = self.prompt("Phone = ")?;
    if phone.is_empty() {
      return self.report(&Error::InvalidPhone).map(|()| None);
    }
    Ok(Some(ContactInput::new(name, phone)))
  }

  fn prompt(&mut self, label: &str) -> io::Result<String> {
    write!(self.out, "{label}")?;
    self.out.flush()?;
    Ok(self.read_line()?.map(|l| l.trim().to_owned()).unwrap_or_default())
  }

  // ── Plumbing ────────────────────────────────────────────────────────────────

  /// Next line without its terminator, or `None` at end of input.
  fn read_line(&mut self) -> io::Result<Option<String>> {
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
  }

  fn report(&mut self, err: &Error) -> io::Result<()> {
    tracing::debug!(error = %err, "menu command failed");
    writeln!(self.out, "{err}")
  }

  fn show_menu(&mut self) -> io::Result<()> {
    self.clear()?;
    write!(self.out, "{MENU}")?;
    self.out.flush()
  }

  fn clear(&mut self) -> io::Result<()> {
    if self.clear {
      execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Ok(())
  }
}
