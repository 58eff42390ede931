mod error;
pub mod password;
pub mod token;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use moodlog_core::{
    summarize_week, weekly_window_start, EntryDraft, EntryPatch, EntryRecord, Sentiment,
    UserRecord, WeeklySummary,
};
use moodlog_ml::{MoodAnalysis, MoodMlStack};
use moodlog_observability::AppMetrics;
use moodlog_storage::{EntryRepository, UserRepository};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use validator::Validate;

pub use error::JournalError;
pub use token::{Claims, TokenError, TokenSigner, DEFAULT_TOKEN_TTL_SECONDS};

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Clone, Validate)]
struct Credentials {
    #[validate(email)]
    email: String,
    #[validate(length(min = 6))]
    password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: UserRecord,
    pub token: String,
}

/// Entry fields as a client sends them; every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryInput {
    pub content: Option<String>,
    pub sentiment: Option<String>,
    pub summary: Option<String>,
    pub suggestion: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn parse_sentiment(raw: Option<&str>) -> JournalResult<Option<Sentiment>> {
    raw.map(|value| {
        Sentiment::parse(value).ok_or_else(|| JournalError::validation("Invalid sentiment value"))
    })
    .transpose()
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct JournalService<S>
where
    S: UserRepository + EntryRepository,
{
    store: Arc<S>,
    ml_stack: MoodMlStack,
    tokens: TokenSigner,
    metrics: Arc<AppMetrics>,
}

impl<S> JournalService<S>
where
    S: UserRepository + EntryRepository,
{
    pub fn new(
        store: Arc<S>,
        ml_stack: MoodMlStack,
        tokens: TokenSigner,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            store,
            ml_stack,
            tokens,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn ml_stack(&self) -> &MoodMlStack {
        &self.ml_stack
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> JournalResult<AuthSession> {
        let credentials = Credentials {
            email: normalize_email(email),
            password: password.to_string(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(JournalError::validation("Email and password are required"));
        }
        credentials.validate()?;

        if self
            .store
            .find_user_by_email(&credentials.email)
            .await?
            .is_some()
        {
            return Err(JournalError::validation("This email address is already in use"));
        }

        let password_hash = password::hash_password(&credentials.password)?;
        let now = Utc::now();
        let user = self
            .store
            .create_user(&credentials.email, &password_hash, now)
            .await?
            .ok_or_else(|| JournalError::validation("This email address is already in use"))?;

        info!(user_id = user.id, "user registered");
        let token = self.tokens.issue(user.id, &user.email, now);
        Ok(AuthSession { user, token })
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> JournalResult<AuthSession> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(JournalError::validation("Email and password are required"));
        }

        let user = self.store.find_user_by_email(&email).await?;
        let Some(user) = user.filter(|user| password::verify_password(password, &user.password_hash))
        else {
            self.metrics.inc_auth_failure();
            warn!("login rejected");
            return Err(JournalError::InvalidCredentials);
        };

        info!(user_id = user.id, "user logged in");
        let token = self.tokens.issue(user.id, &user.email, Utc::now());
        Ok(AuthSession { user, token })
    }

    pub fn authenticate(&self, token: &str) -> JournalResult<Claims> {
        self.tokens.verify(token, Utc::now()).map_err(|err| {
            self.metrics.inc_auth_failure();
            JournalError::from(err)
        })
    }

    pub async fn current_user(&self, user_id: i64) -> JournalResult<UserRecord> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or(JournalError::UserNotFound)
    }

    pub async fn list_entries(&self, user_id: i64) -> JournalResult<Vec<EntryRecord>> {
        Ok(self.store.list_entries(user_id).await?)
    }

    /// Stores an entry. Derived fields the client left out are filled in by
    /// running the analyzer over the content.
    #[instrument(skip(self, input))]
    pub async fn create_entry(&self, user_id: i64, input: EntryInput) -> JournalResult<EntryRecord> {
        let content = present(&input.content)
            .ok_or_else(|| JournalError::validation("Entry content is required"))?
            .to_string();
        let sentiment = parse_sentiment(present(&input.sentiment))?;
        let summary = present(&input.summary).map(str::to_string);
        let suggestion = present(&input.suggestion).map(str::to_string);

        let draft = match (sentiment, summary, suggestion) {
            (Some(sentiment), Some(summary), Some(suggestion)) => EntryDraft {
                content,
                sentiment,
                summary,
                suggestion,
            },
            (sentiment, summary, suggestion) => {
                let analysis = self.analyze(&content).await?;
                EntryDraft {
                    sentiment: sentiment.unwrap_or(analysis.sentiment),
                    summary: summary.unwrap_or(analysis.summary),
                    suggestion: suggestion.unwrap_or(analysis.suggestion),
                    content,
                }
            }
        };

        let entry = self.store.insert_entry(user_id, &draft, Utc::now()).await?;
        self.metrics.inc_entry_created();
        info!(entry_id = entry.id, sentiment = %entry.sentiment, "entry created");
        Ok(entry)
    }

    #[instrument(skip(self, input))]
    pub async fn update_entry(
        &self,
        user_id: i64,
        entry_id: i64,
        input: EntryInput,
    ) -> JournalResult<EntryRecord> {
        if input.content.is_some() && present(&input.content).is_none() {
            return Err(JournalError::validation("Entry content cannot be empty"));
        }
        let patch = EntryPatch {
            content: present(&input.content).map(str::to_string),
            sentiment: parse_sentiment(present(&input.sentiment))?,
            summary: input.summary.as_deref().map(|value| value.trim().to_string()),
            suggestion: input.suggestion.as_deref().map(|value| value.trim().to_string()),
        };
        if patch.is_empty() {
            return Err(JournalError::validation("No fields to update"));
        }

        let mut entry = self.owned_entry(user_id, entry_id).await?;
        patch.apply(&mut entry, Utc::now());
        if !self.store.update_entry(&entry).await? {
            return Err(JournalError::EntryNotFound);
        }

        info!(entry_id, "entry updated");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn delete_entry(&self, user_id: i64, entry_id: i64) -> JournalResult<()> {
        self.owned_entry(user_id, entry_id).await?;
        if !self.store.delete_entry(entry_id).await? {
            return Err(JournalError::EntryNotFound);
        }

        info!(entry_id, "entry deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all_entries(&self, user_id: i64) -> JournalResult<u64> {
        let deleted = self.store.delete_entries_for_user(user_id).await?;
        info!(deleted, "all entries deleted");
        Ok(deleted)
    }

    pub async fn weekly_summary(&self, user_id: i64) -> JournalResult<WeeklySummary> {
        let now = Utc::now();
        let entries = self
            .store
            .list_entries_since(user_id, weekly_window_start(now))
            .await?;
        Ok(summarize_week(&entries, now))
    }

    /// Classifies text without storing anything.
    #[instrument(skip(self, text))]
    pub async fn analyze(&self, text: &str) -> JournalResult<MoodAnalysis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(JournalError::validation("Please enter some text"));
        }

        let started = Instant::now();
        let analysis = self.ml_stack.analyze(text).await;
        self.metrics.inc_analysis();
        if analysis.trace.remote_attempted() {
            self.metrics.inc_remote_inference();
        }
        if analysis.trace.remote_failed() {
            self.metrics.inc_remote_failure();
        }
        if analysis.trace.keyword_override {
            self.metrics.inc_keyword_override();
        }

        info!(
            sentiment = %analysis.sentiment,
            language = analysis.language.as_code(),
            decided_by = ?analysis.trace.decided_by,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "entry analyzed"
        );
        Ok(analysis)
    }

    async fn owned_entry(&self, user_id: i64, entry_id: i64) -> JournalResult<EntryRecord> {
        let entry = self
            .store
            .find_entry(entry_id)
            .await?
            .ok_or(JournalError::EntryNotFound)?;
        if entry.user_id != user_id {
            warn!(entry_id, "entry access denied");
            return Err(JournalError::Forbidden);
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use moodlog_storage::MemoryStore;

    use super::*;

    fn service() -> JournalService<MemoryStore> {
        JournalService::new(
            Arc::new(MemoryStore::new()),
            MoodMlStack::keyword_only(),
            TokenSigner::new("unit-secret", DEFAULT_TOKEN_TTL_SECONDS),
            AppMetrics::shared(),
        )
    }

    fn content(text: &str) -> EntryInput {
        EntryInput {
            content: Some(text.to_string()),
            ..EntryInput::default()
        }
    }

    #[tokio::test]
    async fn register_then_login_issue_verifiable_tokens() {
        let service = service();
        let registered = service.register(" Ayse@Example.com ", "secret1").await.unwrap();
        assert_eq!(registered.user.email, "ayse@example.com");

        let claims = service.authenticate(&registered.token).unwrap();
        assert_eq!(claims.user_id, registered.user.id);

        let logged_in = service.login("ayse@example.com", "secret1").await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        let me = service.current_user(claims.user_id).await.unwrap();
        assert_eq!(me.email, "ayse@example.com");
    }

    #[tokio::test]
    async fn registration_validates_input() {
        let service = service();
        assert!(matches!(
            service.register("not-an-email", "secret1").await,
            Err(JournalError::Validation(_))
        ));
        assert!(matches!(
            service.register("a@example.com", "12345").await,
            Err(JournalError::Validation(_))
        ));

        service.register("a@example.com", "123456").await.unwrap();
        let duplicate = service.register("A@example.com", "abcdef").await;
        assert!(matches!(duplicate, Err(JournalError::Validation(message)) if message.contains("already")));
    }

    #[tokio::test]
    async fn login_failures_look_identical() {
        let service = service();
        service.register("a@example.com", "secret1").await.unwrap();

        let wrong_password = service.login("a@example.com", "secret2").await.unwrap_err();
        let unknown_user = service.login("nobody@example.com", "secret1").await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(wrong_password.is_auth_failure());
        assert_eq!(service.metrics().snapshot().auth_failures_total, 2);
    }

    #[tokio::test]
    async fn create_entry_fills_missing_fields_from_analysis() {
        let service = service();
        let user = service.register("a@example.com", "secret1").await.unwrap().user;

        let entry = service
            .create_entry(user.id, content("Bugün çok yorgunum ve mutsuzum"))
            .await
            .unwrap();
        assert_eq!(entry.sentiment, Sentiment::Negative);
        assert!(!entry.summary.is_empty());
        assert_eq!(
            entry.suggestion,
            "💤 Kendine 10-15 dakikalık bir mola ver ve biraz dinlen."
        );

        let explicit = service
            .create_entry(
                user.id,
                EntryInput {
                    content: Some("Quiet day".to_string()),
                    sentiment: Some("positive".to_string()),
                    summary: Some("custom summary".to_string()),
                    suggestion: Some("custom suggestion".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(explicit.sentiment, Sentiment::Positive);
        assert_eq!(explicit.summary, "custom summary");
        assert_eq!(service.metrics().snapshot().entries_created_total, 2);
    }

    #[tokio::test]
    async fn create_entry_rejects_bad_input() {
        let service = service();
        let user = service.register("a@example.com", "secret1").await.unwrap().user;

        assert!(matches!(
            service.create_entry(user.id, content("   ")).await,
            Err(JournalError::Validation(_))
        ));
        let bad_sentiment = EntryInput {
            sentiment: Some("ecstatic".to_string()),
            ..content("fine")
        };
        assert!(matches!(
            service.create_entry(user.id, bad_sentiment).await,
            Err(JournalError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn only_the_owner_may_touch_an_entry() {
        let service = service();
        let owner = service.register("owner@example.com", "secret1").await.unwrap().user;
        let intruder = service.register("intruder@example.com", "secret1").await.unwrap().user;
        let entry = service.create_entry(owner.id, content("My day")).await.unwrap();

        let update = service
            .update_entry(intruder.id, entry.id, content("hijacked"))
            .await;
        assert!(matches!(update, Err(JournalError::Forbidden)));
        assert!(matches!(
            service.delete_entry(intruder.id, entry.id).await,
            Err(JournalError::Forbidden)
        ));
        assert!(matches!(
            service.delete_entry(owner.id, entry.id + 99).await,
            Err(JournalError::EntryNotFound)
        ));

        let unchanged = service.list_entries(owner.id).await.unwrap();
        assert_eq!(unchanged[0].content, "My day");
        assert!(service.list_entries(intruder.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_requires_a_field_and_refreshes_timestamp() {
        let service = service();
        let user = service.register("a@example.com", "secret1").await.unwrap().user;
        let entry = service.create_entry(user.id, content("My day")).await.unwrap();

        assert!(matches!(
            service.update_entry(user.id, entry.id, EntryInput::default()).await,
            Err(JournalError::Validation(_))
        ));
        let bad = EntryInput {
            sentiment: Some("meh".to_string()),
            ..EntryInput::default()
        };
        assert!(matches!(
            service.update_entry(user.id, entry.id, bad).await,
            Err(JournalError::Validation(_))
        ));

        let good = EntryInput {
            sentiment: Some("negative".to_string()),
            ..EntryInput::default()
        };
        let updated = service.update_entry(user.id, entry.id, good).await.unwrap();
        assert_eq!(updated.sentiment, Sentiment::Negative);
        assert_eq!(updated.content, "My day");
        assert_eq!(updated.user_id, user.id);
        assert!(updated.updated_at >= entry.updated_at);
    }

    #[tokio::test]
    async fn weekly_summary_and_bulk_delete() {
        let service = service();
        let user = service.register("a@example.com", "secret1").await.unwrap().user;
        service.create_entry(user.id, content("What a great day")).await.unwrap();
        service.create_entry(user.id, content("I feel grateful and happy")).await.unwrap();
        service.create_entry(user.id, content("So tired and sad")).await.unwrap();

        let weekly = service.weekly_summary(user.id).await.unwrap();
        assert_eq!(weekly.total_entries, 3);
        assert_eq!(weekly.positive + weekly.neutral + weekly.negative, 3);
        assert_eq!(weekly.dominant_sentiment, Sentiment::Positive);

        assert_eq!(service.delete_all_entries(user.id).await.unwrap(), 3);
        let weekly = service.weekly_summary(user.id).await.unwrap();
        assert_eq!(weekly.total_entries, 0);
        assert_eq!(weekly.dominant_sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn analyze_rejects_blank_text() {
        let service = service();
        assert!(matches!(
            service.analyze("  ").await,
            Err(JournalError::Validation(_))
        ));
        let analysis = service.analyze("not good at all").await.unwrap();
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(service.metrics().snapshot().analyses_total, 1);
    }
}
