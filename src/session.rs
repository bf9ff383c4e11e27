use std::{cell::RefCell, collections::BTreeMap};

use tracing::{debug, info, warn};

use crate::{
    error::{AppError, FieldValidationError},
    notify::Notifier,
    picture::PictureEncoder,
    profile::{Profile, ProfileField, VALIDATED_FIELDS},
    validation::{has_non_digit, trim_start_blank, validate},
};

/// Message sent to the notifier after a successful save
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

/// Whether the card is showing or editing the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Result of a field change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    /// Value stored in the draft and revalidated
    Stored,
    /// Input filtered out, draft unchanged
    Rejected,
}

/// Result of a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft became the committed profile
    Committed,
    /// At least one field failed validation, still editing
    Rejected,
}

/// Result of a picture change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureOutcome {
    /// Token stored in the current draft
    Applied,
    /// Edit ended before the conversion finished
    Discarded,
    /// Conversion failed, draft unchanged
    Failed,
}

/// Identifies the edit a pending picture conversion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureTicket {
    generation: u64,
}

/// Committed profile plus the draft and errors of the current edit
#[derive(Debug)]
pub struct ProfileEditSession<N> {
    committed: Profile,
    draft: Option<Profile>,
    errors: BTreeMap<ProfileField, FieldValidationError>,
    generation: u64,
    notifier: N,
}

impl<N: Notifier> ProfileEditSession<N> {
    /// Starts a session in view mode showing `committed`
    pub fn new(committed: Profile, notifier: N) -> Self {
        Self {
            committed,
            draft: None,
            errors: BTreeMap::new(),
            generation: 0,
            notifier,
        }
    }

    /// Current mode, editing while a draft is open
    pub fn mode(&self) -> Mode {
        if self.draft.is_some() {
            Mode::Editing
        } else {
            Mode::Viewing
        }
    }

    /// Last saved profile
    pub fn committed(&self) -> &Profile {
        &self.committed
    }

    /// Draft of the current edit, `None` while viewing
    pub fn draft(&self) -> Option<&Profile> {
        self.draft.as_ref()
    }

    /// Profile the card should currently show
    pub fn displayed(&self) -> &Profile {
        self.draft.as_ref().unwrap_or(&self.committed)
    }

    /// Field errors of the current edit
    pub fn errors(&self) -> &BTreeMap<ProfileField, FieldValidationError> {
        &self.errors
    }

    /// Error shown next to `field`, if any
    pub fn error_for(&self, field: ProfileField) -> Option<&FieldValidationError> {
        self.errors.get(&field)
    }

    /// Notifier told about successful saves
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Opens an edit on a fresh copy of the committed profile
    pub fn enter_edit(&mut self) -> Result<(), AppError> {
        if self.draft.is_some() {
            return Err(AppError::AlreadyEditing);
        }
        self.generation += 1;
        self.draft = Some(self.committed.clone());
        self.errors.clear();
        debug!(generation = self.generation, "entered edit mode");
        Ok(())
    }

    /// Stores a field value in the draft and revalidates that field
    ///
    /// # Arguments
    /// * `field` - Field being edited
    /// * `raw` - Value as typed by the user
    pub fn change_field(&mut self, field: ProfileField, raw: &str) -> Result<FieldChange, AppError> {
        let draft = self.draft.as_mut().ok_or(AppError::NotEditing)?;

        if field == ProfileField::Phone && has_non_digit(raw) {
            debug!(%field, "rejected non-digit phone input");
            return Ok(FieldChange::Rejected);
        }

        let stored = match field {
            ProfileField::Name => trim_start_blank(raw),
            _ => raw,
        };
        draft.set(field, stored.to_string());

        match validate(field, stored) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
        Ok(FieldChange::Stored)
    }

    /// Marks the start of a picture conversion for the current edit
    pub fn begin_picture_change(&self) -> Result<PictureTicket, AppError> {
        if self.draft.is_none() {
            return Err(AppError::NotEditing);
        }
        Ok(PictureTicket {
            generation: self.generation,
        })
    }

    /// Stores a converted picture if its edit is still open
    pub fn apply_picture(&mut self, ticket: PictureTicket, token: String) -> PictureOutcome {
        match self.draft.as_mut() {
            Some(draft) if ticket.generation == self.generation => {
                draft.profile_picture = token;
                debug!(generation = ticket.generation, "applied new profile picture");
                PictureOutcome::Applied
            }
            _ => {
                debug!(
                    generation = ticket.generation,
                    current = self.generation,
                    "discarded picture for a closed edit"
                );
                PictureOutcome::Discarded
            }
        }
    }

    /// Validates the draft and commits it when every field passes
    pub fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        let draft = self.draft.as_ref().ok_or(AppError::NotEditing)?;

        self.errors.retain(|field, _| VALIDATED_FIELDS.contains(field));
        let mut rejected = false;
        for field in VALIDATED_FIELDS {
            match validate(field, draft.get(field)) {
                Ok(()) => {
                    self.errors.remove(&field);
                }
                Err(e) => {
                    rejected = true;
                    self.errors.insert(field, e);
                }
            }
        }

        if rejected {
            debug!(errors = self.errors.len(), "submit rejected");
            return Ok(SubmitOutcome::Rejected);
        }

        if let Some(draft) = self.draft.take() {
            self.committed = draft;
        }
        self.errors.clear();
        info!(profile = ?self.committed, "profile updated");
        self.notifier.notify_success(PROFILE_UPDATED_MESSAGE);
        Ok(SubmitOutcome::Committed)
    }

    /// Drops the draft and its errors without saving
    pub fn cancel(&mut self) -> Result<(), AppError> {
        if self.draft.take().is_none() {
            return Err(AppError::NotEditing);
        }
        self.errors.clear();
        debug!(generation = self.generation, "edit cancelled");
        Ok(())
    }
}

/// Converts picture bytes and stores the token in the session's draft
///
/// The session is not borrowed while the encoder runs, so other transitions
/// may happen meanwhile. Results arriving after the edit ended are dropped
/// and encoder failures leave the draft untouched.
pub async fn change_picture<N, E>(
    session: &RefCell<ProfileEditSession<N>>,
    encoder: &E,
    bytes: Vec<u8>,
) -> Result<PictureOutcome, AppError>
where
    N: Notifier,
    E: PictureEncoder,
{
    let ticket = session.borrow().begin_picture_change()?;

    match encoder.encode(bytes).await {
        Ok(token) => Ok(session.borrow_mut().apply_picture(ticket, token)),
        Err(e) => {
            warn!("failed to convert profile picture: {e}");
            Ok(PictureOutcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_success(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    fn seed() -> Profile {
        Profile {
            name: "A".to_string(),
            email: "a@a.com".to_string(),
            phone: "1234567890".to_string(),
            profile_picture: "src/assets/user.png".to_string(),
        }
    }

    fn editing() -> ProfileEditSession<RecordingNotifier> {
        let mut session = ProfileEditSession::new(seed(), RecordingNotifier::default());
        session.enter_edit().unwrap();
        session
    }

    #[test]
    fn starts_viewing_committed_profile() {
        let session = ProfileEditSession::new(seed(), RecordingNotifier::default());
        assert_eq!(session.mode(), Mode::Viewing);
        assert!(session.draft().is_none());
        assert_eq!(session.displayed(), &seed());
    }

    #[test]
    fn enter_edit_copies_committed_profile() {
        let session = editing();
        assert_eq!(session.mode(), Mode::Editing);
        assert_eq!(session.draft(), Some(&seed()));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn enter_edit_twice_is_rejected() {
        let mut session = editing();
        session.change_field(ProfileField::Name, "Bob").unwrap();
        assert!(matches!(session.enter_edit(), Err(AppError::AlreadyEditing)));
        assert_eq!(session.draft().unwrap().name, "Bob");
    }

    #[test]
    fn enter_then_cancel_keeps_committed_profile() {
        let mut session = editing();
        session.cancel().unwrap();
        assert_eq!(session.mode(), Mode::Viewing);
        assert_eq!(session.committed(), &seed());
    }

    #[test]
    fn cancel_discards_edits_and_errors() {
        let mut session = editing();
        session.change_field(ProfileField::Email, "broken").unwrap();
        assert!(session.error_for(ProfileField::Email).is_some());
        session.cancel().unwrap();
        assert!(session.errors().is_empty());
        assert_eq!(session.committed(), &seed());

        session.enter_edit().unwrap();
        assert_eq!(session.draft().unwrap().email, "a@a.com");
    }

    #[test]
    fn phone_filter_rejects_non_digits() {
        let mut session = editing();
        assert_eq!(
            session.change_field(ProfileField::Phone, "97a620").unwrap(),
            FieldChange::Rejected
        );
        assert_eq!(session.draft().unwrap().phone, "1234567890");
        assert!(session.error_for(ProfileField::Phone).is_none());

        assert_eq!(
            session.change_field(ProfileField::Phone, "9762016975").unwrap(),
            FieldChange::Stored
        );
        assert_eq!(session.draft().unwrap().phone, "9762016975");
    }

    #[test]
    fn name_strips_leading_whitespace_only() {
        let mut session = editing();
        session.change_field(ProfileField::Name, "  Bob ").unwrap();
        assert_eq!(session.draft().unwrap().name, "Bob ");
        assert!(session.error_for(ProfileField::Name).is_none());

        session.change_field(ProfileField::Name, "12345").unwrap();
        assert_eq!(session.draft().unwrap().name, "12345");
        assert_eq!(
            session.error_for(ProfileField::Name).map(ToString::to_string).as_deref(),
            Some("Name cannot contain only numbers.")
        );
    }

    #[test]
    fn change_field_updates_only_its_own_error() {
        let mut session = editing();
        session.change_field(ProfileField::Email, "x").unwrap();
        session.change_field(ProfileField::Phone, "1").unwrap();
        session.change_field(ProfileField::Email, "x@y.z").unwrap();
        assert!(session.error_for(ProfileField::Email).is_none());
        assert_eq!(
            session.error_for(ProfileField::Phone),
            Some(&FieldValidationError::InvalidPhone)
        );
    }

    #[test]
    fn submit_with_invalid_phone_stays_editing() {
        let mut session = editing();
        session.change_field(ProfileField::Phone, "123").unwrap();
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);
        assert_eq!(session.mode(), Mode::Editing);
        assert_eq!(
            session.error_for(ProfileField::Phone).map(ToString::to_string).as_deref(),
            Some("Phone number must be exactly 10 digits.")
        );
        assert_eq!(session.committed(), &seed());
        assert!(session.notifier().messages.borrow().is_empty());
    }

    #[test]
    fn submit_commits_draft_and_notifies() {
        let mut session = editing();
        session.change_field(ProfileField::Name, "Bob").unwrap();
        session.change_field(ProfileField::Email, "bob@example.com").unwrap();
        let expected = session.draft().cloned().unwrap();

        assert_eq!(session.submit().unwrap(), SubmitOutcome::Committed);
        assert_eq!(session.mode(), Mode::Viewing);
        assert_eq!(session.committed(), &expected);
        assert!(session.errors().is_empty());
        assert_eq!(
            *session.notifier().messages.borrow(),
            vec![PROFILE_UPDATED_MESSAGE.to_string()]
        );
    }

    #[test]
    fn submit_revalidates_untouched_fields() {
        let mut session = ProfileEditSession::new(
            Profile {
                email: "legacy".to_string(),
                ..seed()
            },
            RecordingNotifier::default(),
        );
        session.enter_edit().unwrap();
        assert!(session.errors().is_empty());
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);
        assert_eq!(
            session.error_for(ProfileField::Email),
            Some(&FieldValidationError::InvalidEmail)
        );
    }

    #[test]
    fn empty_picture_does_not_block_submit() {
        let mut session = editing();
        session.change_field(ProfileField::ProfilePicture, "").unwrap();
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Committed);
        assert_eq!(session.committed().profile_picture, "");
    }

    #[test]
    fn rejected_submit_drops_errors_of_unchecked_fields() {
        let mut session = editing();
        session.change_field(ProfileField::ProfilePicture, "").unwrap();
        session.change_field(ProfileField::Email, "bad").unwrap();
        assert!(session.error_for(ProfileField::ProfilePicture).is_some());

        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);
        assert!(session.error_for(ProfileField::ProfilePicture).is_none());
        assert_eq!(
            session.error_for(ProfileField::Email),
            Some(&FieldValidationError::InvalidEmail)
        );
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn name_strips_leading_byte_order_mark() {
        let mut session = editing();
        session.change_field(ProfileField::Name, "\u{FEFF}Bob").unwrap();
        assert_eq!(session.draft().unwrap().name, "Bob");

        session.change_field(ProfileField::Name, "\u{FEFF}").unwrap();
        assert_eq!(
            session.error_for(ProfileField::Name),
            Some(&FieldValidationError::Required("Name"))
        );
    }

    #[test]
    fn edit_transitions_while_viewing_are_rejected() {
        let mut session = ProfileEditSession::new(seed(), RecordingNotifier::default());
        assert!(matches!(
            session.change_field(ProfileField::Name, "Bob"),
            Err(AppError::NotEditing)
        ));
        assert!(matches!(session.begin_picture_change(), Err(AppError::NotEditing)));
        assert!(matches!(session.submit(), Err(AppError::NotEditing)));
        assert!(matches!(session.cancel(), Err(AppError::NotEditing)));
        assert_eq!(session.committed(), &seed());
        assert_eq!(session.mode(), Mode::Viewing);
    }

    #[test]
    fn picture_ticket_from_a_closed_edit_is_discarded() {
        let mut session = editing();
        let ticket = session.begin_picture_change().unwrap();
        session.cancel().unwrap();
        session.enter_edit().unwrap();

        let outcome = session.apply_picture(ticket, "data:image/png;base64,AAAA".to_string());
        assert_eq!(outcome, PictureOutcome::Discarded);
        assert_eq!(session.draft().unwrap().profile_picture, "src/assets/user.png");
    }

    #[test]
    fn last_completed_picture_wins() {
        let mut session = editing();
        let first = session.begin_picture_change().unwrap();
        let second = session.begin_picture_change().unwrap();
        session.apply_picture(second, "data:second".to_string());
        session.apply_picture(first, "data:first".to_string());
        assert_eq!(session.draft().unwrap().profile_picture, "data:first");
    }
}
