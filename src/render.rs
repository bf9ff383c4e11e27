use colored::Colorize;

use crate::{
    notify::Notifier,
    picture::display_token,
    profile::{Profile, ProfileField, VALIDATED_FIELDS},
    session::{Mode, ProfileEditSession},
};

const CARD_TITLE: &str = "User Profile";

/// Renders the card for the session's current mode
///
/// Edit mode lists the draft with any field errors under their field.
pub fn render_session<N: Notifier>(session: &ProfileEditSession<N>) -> String {
    match session.mode() {
        Mode::Viewing => render_profile(session.committed()),
        Mode::Editing => {
            let mut out = card(session.displayed(), |field| {
                session.error_for(field).map(ToString::to_string)
            });
            out.push_str(&format!("\n{}", "(editing)".yellow()));
            out
        }
    }
}

/// Renders a profile outside of any edit
pub fn render_profile(profile: &Profile) -> String {
    card(profile, |_| None)
}

fn card<F>(profile: &Profile, error_for: F) -> String
where
    F: Fn(ProfileField) -> Option<String>,
{
    let mut lines: Vec<String> = vec![format!("{}", CARD_TITLE.bold())];
    lines.push(format!("{} {}", "Picture:".bold(), display_token(&profile.profile_picture)));
    for field in VALIDATED_FIELDS {
        lines.push(format!("{} {}", format!("{}:", field.label()).bold(), profile.get(field)));
        if let Some(message) = error_for(field) {
            lines.push(format!("  {}", message.red()));
        }
    }
    lines.join("\n")
}
