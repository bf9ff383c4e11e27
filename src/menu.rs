use std::{cell::RefCell, path::PathBuf};

use colored::Colorize;
use inquire::{Select, Text};
use tracing::warn;

use crate::{
    error::AppError,
    notify::Notifier,
    picture::{PictureEncoder, read_picture_file},
    profile::ProfileField,
    render::render_session,
    session::{FieldChange, Mode, PictureOutcome, ProfileEditSession, SubmitOutcome, change_picture},
};

/// Runs interactive profile card
pub async fn run_menu<N, E>(session: &RefCell<ProfileEditSession<N>>, encoder: &E) -> Result<(), AppError>
where
    N: Notifier,
    E: PictureEncoder,
{
    loop {
        println!("\n{}\n", render_session(&*session.borrow()));

        let mode = session.borrow().mode();
        let keep_going = match mode {
            Mode::Viewing => view_menu(session)?,
            Mode::Editing => {
                edit_menu(session, encoder).await?;
                true
            }
        };

        if !keep_going {
            println!("{}", "quitting".yellow());
            break Ok(());
        }
    }
}

/// Menu shown while viewing, returns false on quit
fn view_menu<N: Notifier>(session: &RefCell<ProfileEditSession<N>>) -> Result<bool, AppError> {
    let actions: Vec<&'static str> = vec!["edit", "quit"];
    let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
        .prompt()?;

    match action_selected {
        "edit" => {
            session.borrow_mut().enter_edit()?;
            Ok(true)
        }
        "quit" => Ok(false),
        _ => unreachable!("unexpected input"),
    }
}

/// Menu shown while editing
async fn edit_menu<N, E>(session: &RefCell<ProfileEditSession<N>>, encoder: &E) -> Result<(), AppError>
where
    N: Notifier,
    E: PictureEncoder,
{
    let actions: Vec<&'static str> = vec![
        "change name",
        "change email",
        "change phone",
        "change picture",
        "save",
        "cancel",
    ];

    let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
        .prompt()?;

    match action_selected {
        "change name" => menu_change_field(session, ProfileField::Name)?,
        "change email" => menu_change_field(session, ProfileField::Email)?,
        "change phone" => menu_change_field(session, ProfileField::Phone)?,
        "change picture" => menu_change_picture(session, encoder).await?,
        "save" => {
            if session.borrow_mut().submit()? == SubmitOutcome::Rejected {
                println!("{}", "fix the highlighted fields before saving".red());
            }
        }
        "cancel" => session.borrow_mut().cancel()?,
        _ => unreachable!("unexpected input"),
    }
    Ok(())
}

/// Prompts for a new field value, starting from the draft value
fn menu_change_field<N: Notifier>(
    session: &RefCell<ProfileEditSession<N>>,
    field: ProfileField,
) -> Result<(), AppError> {
    let current: String = session.borrow().displayed().get(field).to_string();
    let input: String = Text::new(&format!("{}", format!("enter {}:", field.label().to_lowercase()).blue()))
        .with_initial_value(&current)
        .prompt()?;

    if session.borrow_mut().change_field(field, &input)? == FieldChange::Rejected {
        println!("{}", "phone number may only contain digits".red());
    }
    Ok(())
}

/// Prompts for an image file and converts it into the draft picture
async fn menu_change_picture<N, E>(session: &RefCell<ProfileEditSession<N>>, encoder: &E) -> Result<(), AppError>
where
    N: Notifier,
    E: PictureEncoder,
{
    let path: PathBuf = Text::new(&format!("{}", "enter image path:".blue()))
        .prompt()?
        .into();

    let bytes: Vec<u8> = match read_picture_file(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), "failed to read picture: {e}");
            return Ok(());
        }
    };

    if change_picture(session, encoder, bytes).await? == PictureOutcome::Failed {
        println!("{}", "picture unchanged".yellow());
    }
    Ok(())
}
