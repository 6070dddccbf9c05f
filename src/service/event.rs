use super::validation::{RequestValidator, Validate};
use crate::entities::Event;
use crate::error::AppError;
use crate::message::Message;
use crate::repository::Repository;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

fn default_true() -> bool {
    true
}

fn check_window(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<(), AppError> {
    if end_at < start_at {
        return Err(AppError::Validation("endAt must not be before startAt".into()));
    }
    Ok(())
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub title: String,
    pub contents: String,
    #[serde(default = "default_true")]
    pub is_event: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl Validate for CreateEventInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("title", &self.title, 100)?;
        RequestValidator::text("contents", &self.contents, 10_000)?;
        check_window(self.start_at, self.end_at)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub contents: Option<String>,
    pub is_event: Option<bool>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl Validate for UpdateEventInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::optional_text("title", self.title.as_deref(), 100)?;
        RequestValidator::optional_text("contents", self.contents.as_deref(), 10_000)
    }
}

impl UpdateEventInput {
    fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(contents) = self.contents {
            event.contents = contents;
        }
        if let Some(is_event) = self.is_event {
            event.is_event = is_event;
        }
        if let Some(start_at) = self.start_at {
            event.start_at = start_at;
        }
        if let Some(end_at) = self.end_at {
            event.end_at = end_at;
        }
    }
}

#[derive(Clone)]
pub struct EventService {
    events: Repository<Event>,
}

impl EventService {
    pub fn new(events: Repository<Event>) -> Self {
        EventService { events }
    }

    pub async fn find_all(&self) -> Result<Vec<Event>, AppError> {
        self.events.find_all().await
    }

    /// Events flagged active whose window contains `now`.
    pub async fn find_ongoing(&self, now: DateTime<Utc>) -> Result<Vec<Event>, AppError> {
        let all = self.events.find_all().await?;
        Ok(all.into_iter().filter(|e| e.is_ongoing(now)).collect())
    }

    pub async fn create(&self, user_id: Option<Uuid>, input: CreateEventInput) -> Result<Event, AppError> {
        input.validate()?;
        self.events
            .save(Event::new(
                user_id,
                input.title,
                input.contents,
                input.is_event,
                input.start_at,
                input.end_at,
            ))
            .await
    }

    pub async fn update(&self, id: Uuid, input: UpdateEventInput) -> Result<Event, AppError> {
        input.validate()?;
        let mut event = self
            .events
            .find_one(id, false)
            .await?
            .ok_or(AppError::Conflict(Message::EVENT_UNVALID))?;
        input.apply(&mut event);
        check_window(event.start_at, event.end_at)?;
        self.events.save(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> CreateEventInput {
        CreateEventInput {
            title: "launch".into(),
            contents: "free episodes".into(),
            is_event: true,
            start_at,
            end_at,
        }
    }

    #[tokio::test]
    async fn ongoing_filters_by_window_and_flag() {
        let svc = EventService::new(Repository::in_memory());
        let now = Utc::now();
        let day = Duration::days(1);
        let live = svc.create(None, input(now - day, now + day)).await.unwrap();
        svc.create(None, input(now - day * 3, now - day * 2)).await.unwrap();
        let mut off = input(now - day, now + day);
        off.is_event = false;
        svc.create(None, off).await.unwrap();

        let ongoing = svc.find_ongoing(now).await.unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].id, live.id);
        assert_eq!(svc.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let svc = EventService::new(Repository::in_memory());
        let now = Utc::now();
        let err = svc.create(None, input(now, now - Duration::hours(1))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let ev = svc.create(None, input(now, now + Duration::hours(1))).await.unwrap();
        let bad = UpdateEventInput {
            end_at: Some(now - Duration::hours(2)),
            ..Default::default()
        };
        assert!(matches!(svc.update(ev.id, bad).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn update_missing_event_is_conflict() {
        let svc = EventService::new(Repository::in_memory());
        let err = svc.update(Uuid::new_v4(), UpdateEventInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::EVENT_UNVALID)));
    }
}
