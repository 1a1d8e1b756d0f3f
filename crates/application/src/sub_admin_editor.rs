//! Add/edit surface state for one sub-admin account.
//!
//! The editor owns the typed form, the permission [`SelectionDraft`], and the
//! submission phase. Failures keep the form and draft intact so the operator
//! can correct and resubmit.

use eventdesk_core::{ActorIdentity, AppError, AppResult};
use eventdesk_domain::{
    CreateSubAdminInput, SelectionDraft, SubAdminAccount, SubAdminId, SubAdminRole,
    UpdateSubAdminInput,
};

use crate::access_gate::AccessGate;
use crate::failure::{FailureKind, classify_failure};
use crate::session_ports::SessionContext;
use crate::sub_admin_service::SubAdminService;

/// Which lifecycle operation the editor submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Add a new account.
    Create,
    /// Edit an existing account.
    Edit(SubAdminId),
}

/// Submission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Waiting for operator input.
    Idle,
    /// Running local validation.
    Validating,
    /// Waiting for the lifecycle operation.
    Submitting,
}

/// Result of the most recent submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The account was saved.
    Succeeded,
    /// The submit failed with the given kind.
    Failed(FailureKind),
}

/// Typed form fields of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubAdminForm {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone, blank for none.
    pub phone: String,
    /// Role tag.
    pub role: SubAdminRole,
    /// Active flag. Only submitted in edit mode.
    pub is_active: bool,
    /// Password. Blank in edit mode keeps the current one.
    pub password: String,
    /// Password confirmation. Edit mode only.
    pub confirm_password: String,
}

impl Default for SubAdminForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: SubAdminRole::default(),
            is_active: true,
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

/// Inline error shown by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorError {
    /// Failure category.
    pub kind: FailureKind,
    /// Operator facing message.
    pub message: String,
}

/// Editing surface for adding or editing one sub-admin.
#[derive(Debug, Clone)]
pub struct SubAdminEditor {
    mode: EditorMode,
    form: SubAdminForm,
    draft: SelectionDraft,
    phase: EditorPhase,
    outcome: Option<EditorOutcome>,
    error: Option<EditorError>,
}

impl SubAdminEditor {
    /// Opens an empty editor for a new account.
    #[must_use]
    pub fn for_create() -> Self {
        Self::with(EditorMode::Create, SubAdminForm::default(), SelectionDraft::new())
    }

    /// Opens an editor pre-filled from an existing account. Password fields
    /// start blank.
    #[must_use]
    pub fn for_edit(account: &SubAdminAccount) -> Self {
        let form = SubAdminForm {
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone().unwrap_or_default(),
            role: account.role,
            is_active: account.is_active,
            password: String::new(),
            confirm_password: String::new(),
        };

        Self::with(
            EditorMode::Edit(account.id),
            form,
            SelectionDraft::from_permissions(account.permissions.iter()),
        )
    }

    fn with(mode: EditorMode, form: SubAdminForm, draft: SelectionDraft) -> Self {
        Self {
            mode,
            form,
            draft,
            phase: EditorPhase::Idle,
            outcome: None,
            error: None,
        }
    }

    /// Returns the editor mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the form fields.
    #[must_use]
    pub fn form(&self) -> &SubAdminForm {
        &self.form
    }

    /// Returns the form fields for editing.
    pub fn form_mut(&mut self) -> &mut SubAdminForm {
        &mut self.form
    }

    /// Returns the permission draft.
    #[must_use]
    pub fn draft(&self) -> &SelectionDraft {
        &self.draft
    }

    /// Returns the permission draft for toggling.
    pub fn draft_mut(&mut self) -> &mut SelectionDraft {
        &mut self.draft
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Returns the outcome of the last submit, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<EditorOutcome> {
        self.outcome
    }

    /// Returns the inline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&EditorError> {
        self.error.as_ref()
    }

    /// Dismisses the inline error.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Validates locally, submits to the lifecycle service, and routes
    /// authentication failures through the access gate.
    ///
    /// Validation failures never reach the service. Authentication failures
    /// are not shown inline.
    pub async fn submit(
        &mut self,
        service: &SubAdminService,
        actor: &ActorIdentity,
        gate: &AccessGate,
        session: &dyn SessionContext,
    ) -> AppResult<SubAdminAccount> {
        if self.phase != EditorPhase::Idle {
            return Err(AppError::Validation(
                "a submission is already in progress".to_owned(),
            ));
        }

        self.error = None;
        self.outcome = None;
        self.phase = EditorPhase::Validating;

        let request = match self.validated_request() {
            Ok(request) => request,
            Err(error) => {
                self.fail(&error);
                return Err(error);
            }
        };

        self.phase = EditorPhase::Submitting;
        let result = {
            let _idle_on_drop = IdleOnDrop(&mut self.phase);
            let result = match request {
                EditorRequest::Create(input) => service.create(actor, input).await,
                EditorRequest::Update(id, input) => service.update(actor, id, input).await,
            };
            gate.intercept(session, result).await
        };

        match result {
            Ok(account) => {
                self.phase = EditorPhase::Idle;
                self.outcome = Some(EditorOutcome::Succeeded);
                self.form.password.clear();
                self.form.confirm_password.clear();
                Ok(account)
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    fn validated_request(&self) -> AppResult<EditorRequest> {
        let phone = Some(self.form.phone.trim())
            .filter(|phone| !phone.is_empty())
            .map(str::to_owned);
        let permissions = self.draft.flatten();

        match self.mode {
            EditorMode::Create => {
                let input = CreateSubAdminInput {
                    name: self.form.name.clone(),
                    email: self.form.email.clone(),
                    password: self.form.password.clone(),
                    phone,
                    role: Some(self.form.role),
                    permissions,
                };
                input.validate()?;
                Ok(EditorRequest::Create(input))
            }
            EditorMode::Edit(id) => {
                let input = UpdateSubAdminInput {
                    name: self.form.name.clone(),
                    email: self.form.email.clone(),
                    phone,
                    role: Some(self.form.role),
                    is_active: Some(self.form.is_active),
                    password: self.form.password.clone(),
                    confirm_password: self.form.confirm_password.clone(),
                    permissions,
                };
                input.validate()?;
                Ok(EditorRequest::Update(id, input))
            }
        }
    }

    fn fail(&mut self, error: &AppError) {
        let kind = classify_failure(error);
        self.phase = EditorPhase::Idle;
        self.outcome = Some(EditorOutcome::Failed(kind));
        self.error = match kind {
            FailureKind::Authentication => None,
            FailureKind::Validation | FailureKind::Server => Some(EditorError {
                kind,
                message: error.to_string(),
            }),
        };
    }
}

enum EditorRequest {
    Create(CreateSubAdminInput),
    Update(SubAdminId, UpdateSubAdminInput),
}

/// Returns the editor to `Idle` even when the submit future is dropped
/// mid-flight.
struct IdleOnDrop<'a>(&'a mut EditorPhase);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = EditorPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use eventdesk_core::{ActorIdentity, ActorRole, AppError, AppResult};
    use eventdesk_domain::{SubAdminAccount, SubAdminId};

    use super::{EditorOutcome, EditorPhase, SubAdminEditor};
    use crate::{
        AccessGate, AuditEvent, AuditRepository, FailureKind, PasswordHasher, SessionContext,
        SessionVerifier, SubAdminRepository, SubAdminService,
    };

    #[derive(Default)]
    struct FakeRepository {
        accounts: Mutex<HashMap<SubAdminId, SubAdminAccount>>,
        calls: AtomicUsize,
        reject_auth: AtomicBool,
    }

    impl FakeRepository {
        fn touch(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_auth.load(Ordering::SeqCst) {
                return Err(AppError::Unauthorized("Authentication failed".to_owned()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SubAdminRepository for FakeRepository {
        async fn list(&self) -> AppResult<Vec<SubAdminAccount>> {
            self.touch()?;
            Ok(self.accounts.lock().await.values().cloned().collect())
        }

        async fn find_by_id(&self, id: SubAdminId) -> AppResult<Option<SubAdminAccount>> {
            self.touch()?;
            Ok(self.accounts.lock().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<SubAdminAccount>> {
            self.touch()?;
            Ok(self
                .accounts
                .lock()
                .await
                .values()
                .find(|account| account.email == email)
                .cloned())
        }

        async fn insert(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
            self.touch()?;
            self.accounts
                .lock()
                .await
                .insert(account.id, account.clone());
            Ok(account)
        }

        async fn update(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
            self.touch()?;
            self.accounts
                .lock()
                .await
                .insert(account.id, account.clone());
            Ok(account)
        }

        async fn delete(&self, id: SubAdminId) -> AppResult<()> {
            self.touch()?;
            self.accounts.lock().await.remove(&id);
            Ok(())
        }
    }

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash_password(&self, password: &str) -> AppResult<String> {
            Ok(format!("hashed:{password}"))
        }
    }

    struct NullAudit;

    #[async_trait]
    impl AuditRepository for NullAudit {
        async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
            Ok(())
        }
    }

    struct AcceptingVerifier;

    #[async_trait]
    impl SessionVerifier for AcceptingVerifier {
        async fn verify(&self, token: &str) -> AppResult<ActorIdentity> {
            Ok(root_with_subject(token))
        }
    }

    #[derive(Default)]
    struct FakeSession {
        token: Mutex<Option<String>>,
        redirects: AtomicUsize,
    }

    #[async_trait]
    impl SessionContext for FakeSession {
        async fn token(&self) -> AppResult<Option<String>> {
            Ok(self.token.lock().await.clone())
        }

        async fn clear_token(&self) -> AppResult<()> {
            *self.token.lock().await = None;
            Ok(())
        }

        async fn redirect_to_sign_in(&self) -> AppResult<()> {
            self.redirects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn is_redirected(&self) -> bool {
            self.redirects.load(Ordering::SeqCst) > 0
        }
    }

    fn root_with_subject(subject: &str) -> ActorIdentity {
        ActorIdentity::new(subject, "Root", None, ActorRole::SuperAdmin, Vec::new(), true)
    }

    struct Fixture {
        repository: Arc<FakeRepository>,
        service: SubAdminService,
        gate: AccessGate,
        session: FakeSession,
        actor: ActorIdentity,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(FakeRepository::default());
        let service = SubAdminService::new(
            repository.clone(),
            Arc::new(PlainHasher),
            Arc::new(NullAudit),
        );

        Fixture {
            repository,
            service,
            gate: AccessGate::new(Arc::new(AcceptingVerifier)),
            session: FakeSession {
                token: Mutex::new(Some("root".to_owned())),
                ..FakeSession::default()
            },
            actor: root_with_subject("root"),
        }
    }

    fn fill_ann(editor: &mut SubAdminEditor) {
        let form = editor.form_mut();
        form.name = "Ann".to_owned();
        form.email = "ann@x.com".to_owned();
        form.password = "secret1".to_owned();
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    #[tokio::test]
    async fn create_then_edit_with_category_toggle() {
        let fixture = fixture();
        let mut editor = SubAdminEditor::for_create();
        fill_ann(&mut editor);
        editor.draft_mut().toggle_leaf("events-all");

        let created = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await
            .unwrap_or_else(|_| unreachable!());

        assert!(created.is_active);
        assert_eq!(created.role.as_str(), "SUB_ADMIN");
        assert_eq!(created.permissions, set(&["events-all"]));
        assert_eq!(editor.outcome(), Some(EditorOutcome::Succeeded));
        assert!(editor.form().password.is_empty());

        let mut editor = SubAdminEditor::for_edit(&created);
        editor.draft_mut().toggle_category("events");
        let updated = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            updated.permissions,
            set(&[
                "events-all",
                "events-create",
                "events-categories",
                "events-approvals",
            ])
        );
        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(fixture.repository.accounts.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn empty_permissions_fail_locally_and_keep_the_form() {
        let fixture = fixture();
        let mut editor = SubAdminEditor::for_create();
        fill_ann(&mut editor);

        let result = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fixture.repository.calls.load(Ordering::SeqCst), 0);
        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert_eq!(
            editor.outcome(),
            Some(EditorOutcome::Failed(FailureKind::Validation))
        );
        assert_eq!(editor.form().name, "Ann");
        assert_eq!(editor.form().email, "ann@x.com");
        assert_eq!(editor.form().password, "secret1");
        assert!(
            editor
                .error()
                .is_some_and(|error| error.message.contains("permissions"))
        );
    }

    #[tokio::test]
    async fn new_submit_clears_previous_error() {
        let fixture = fixture();
        let mut editor = SubAdminEditor::for_create();
        fill_ann(&mut editor);

        let _ = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;
        assert!(editor.error().is_some());

        editor.draft_mut().toggle_leaf("venues-all");
        let result = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;

        assert!(result.is_ok());
        assert!(editor.error().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_shown_as_server_error() {
        let fixture = fixture();
        let mut first = SubAdminEditor::for_create();
        fill_ann(&mut first);
        first.draft_mut().toggle_leaf("events-all");
        assert!(
            first
                .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
                .await
                .is_ok()
        );

        let mut second = SubAdminEditor::for_create();
        fill_ann(&mut second);
        second.draft_mut().toggle_leaf("events-all");
        let result = second
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(
            second.error().map(|error| error.kind),
            Some(FailureKind::Server)
        );
        assert!(second.draft().is_selected("events-all"));
        assert_eq!(fixture.session.redirects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authentication_failure_signs_out_without_inline_error() {
        let fixture = fixture();
        fixture.repository.reject_auth.store(true, Ordering::SeqCst);
        let mut editor = SubAdminEditor::for_create();
        fill_ann(&mut editor);
        editor.draft_mut().toggle_leaf("events-all");

        let result = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(editor.error().is_none());
        assert_eq!(
            editor.outcome(),
            Some(EditorOutcome::Failed(FailureKind::Authentication))
        );
        assert_eq!(fixture.session.token.lock().await.clone(), None);
        assert_eq!(fixture.session.redirects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelled_submit_leaves_the_editor_idle() {
        let fixture = fixture();
        let mut editor = SubAdminEditor::for_create();
        fill_ann(&mut editor);
        editor.draft_mut().toggle_leaf("events-all");

        let held = fixture.repository.accounts.lock().await;
        tokio::select! {
            biased;
            _ = editor.submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session) => {
                panic!("submit should wait on the held repository");
            }
            () = std::future::ready(()) => {}
        }
        drop(held);

        assert_eq!(editor.phase(), EditorPhase::Idle);
        let retried = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;
        assert!(retried.is_ok());
        assert_eq!(editor.outcome(), Some(EditorOutcome::Succeeded));
    }

    #[tokio::test]
    async fn edit_rejects_mismatched_confirmation() {
        let fixture = fixture();
        let account = SubAdminAccount {
            id: SubAdminId::new(),
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            phone: None,
            role: eventdesk_domain::SubAdminRole::Support,
            permissions: set(&["content-faqs"]),
            is_active: true,
            password_hash: "hashed:secret1".to_owned(),
            created_at: chrono::Utc::now(),
            created_by: "root".to_owned(),
            updated_at: chrono::Utc::now(),
        };
        let mut editor = SubAdminEditor::for_edit(&account);
        editor.form_mut().password = "newpass".to_owned();
        editor.form_mut().confirm_password = "newpas".to_owned();

        let result = editor
            .submit(&fixture.service, &fixture.actor, &fixture.gate, &fixture.session)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fixture.repository.calls.load(Ordering::SeqCst), 0);
        assert_eq!(editor.draft().flatten(), vec!["content-faqs".to_owned()]);
    }
}
