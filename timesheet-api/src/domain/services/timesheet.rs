use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use time::Date;
use tracing::instrument;

use super::reconcile::{self, EntryChange};
use crate::domain::{
    models::{
        Activity, ActivityId, ActivityStatus, ApprovalStatus, CustomerId, DateRange, Timesheet,
        TimesheetComment, TimesheetEntry, TimesheetSaveOutcome, UserId,
    },
    ports::{
        inbound::TimesheetService,
        outbound::{
            ActivityCatalog, ActivityStatusOracle, ApprovalStatusStore, CommentStore, EntryStore,
        },
    },
    TimesheetError,
};

/// Implementation of the TimesheetService inbound port.
///
/// Every collaborator is an outbound port handed in by the composition
/// root. The comment store is optional; without one, week comments are
/// silently dropped.
pub struct TimesheetServiceImpl<E, O, A, C, K = ()> {
    entries: Arc<E>,
    oracle: Arc<O>,
    approvals: Arc<A>,
    catalog: Arc<C>,
    comments: Option<Arc<K>>,
}

impl<E, O, A, C> TimesheetServiceImpl<E, O, A, C, ()> {
    pub fn new(entries: Arc<E>, oracle: Arc<O>, approvals: Arc<A>, catalog: Arc<C>) -> Self {
        Self {
            entries,
            oracle,
            approvals,
            catalog,
            comments: None,
        }
    }

    pub fn with_comment_store<K>(self, comments: Arc<K>) -> TimesheetServiceImpl<E, O, A, C, K> {
        TimesheetServiceImpl {
            entries: self.entries,
            oracle: self.oracle,
            approvals: self.approvals,
            catalog: self.catalog,
            comments: Some(comments),
        }
    }
}

impl<E, O, A, C, K> TimesheetServiceImpl<E, O, A, C, K>
where
    E: EntryStore,
    A: ApprovalStatusStore,
{
    async fn commit(&self, changes: Vec<EntryChange>) -> Result<(), TimesheetError> {
        for change in changes {
            match change {
                EntryChange::Delete { key, .. } => {
                    tracing::debug!(activity = %key.activity_id, date = %key.date, "deleting entry");
                    self.entries.delete(&key).await?;
                }
                EntryChange::Upsert { entry, .. } => {
                    tracing::debug!(
                        activity = %entry.activity_id(),
                        date = %entry.date(),
                        hours = entry.booked_hours(),
                        "merging entry"
                    );
                    self.entries.merge(entry).await?;
                }
            }
        }
        Ok(())
    }

    /// Make sure the assignee's hours for this customer and range have an
    /// approval status. An existing record is stored again as-is.
    async fn ensure_approval_status(
        &self,
        activity: &Activity,
        range: DateRange,
    ) -> Result<ApprovalStatus, TimesheetError> {
        let user_id = activity.assignee.id;
        let customer_id = &activity.customer().id;

        let existing = self
            .approvals
            .get_for_user_working_for_customer(&user_id, customer_id, &range)
            .await?;

        let status = match existing.into_iter().next() {
            Some(status) => status,
            None => {
                tracing::info!(
                    user = %user_id,
                    customer = %customer_id,
                    %range,
                    "creating approval status"
                );
                ApprovalStatus::in_progress(user_id, customer_id.clone(), range)
            }
        };

        self.approvals.persist(status).await
    }
}

#[async_trait]
impl<E, O, A, C, K> TimesheetService for TimesheetServiceImpl<E, O, A, C, K>
where
    E: EntryStore,
    O: ActivityStatusOracle,
    A: ApprovalStatusStore,
    C: ActivityCatalog,
    K: CommentStore,
{
    #[instrument(skip(self, activity, entries), fields(activity = %activity.id))]
    async fn validate_and_persist(
        &self,
        activity: &Activity,
        entries: Vec<TimesheetEntry>,
        range: DateRange,
    ) -> Result<Vec<ActivityStatus>, TimesheetError> {
        reconcile::validate_hours(&entries)?;

        let before = self.oracle.get_activity_status(activity).await?;

        // Entries may fall outside the range; they still need their stored
        // counterpart for the projection.
        let lookup_range = range.span_including(entries.iter().map(TimesheetEntry::date));
        let existing = self
            .entries
            .get_entries_in_range(&activity.id, &lookup_range)
            .await?;

        let plan = reconcile::plan(&activity.id, entries, &existing);
        if plan.skipped > 0 {
            tracing::warn!(
                skipped = plan.skipped,
                "ignoring entries booked against another activity"
            );
        }

        let projected = match reconcile::check_budget(&before, plan.net_delta) {
            Ok(projected) => projected,
            Err(err) => {
                tracing::info!(
                    net_delta = plan.net_delta,
                    allotted = ?before.allotted_hours,
                    "rejecting batch: {}",
                    err
                );
                return Err(err);
            }
        };

        self.commit(plan.changes).await?;

        let after = self.oracle.get_activity_status(activity).await?;
        if projected.is_valid() && !after.is_valid() {
            // Someone else booked on this activity in the meantime.
            tracing::warn!(
                projected = projected.booked_hours,
                actual = after.booked_hours,
                "activity went over budget concurrently"
            );
        }

        self.ensure_approval_status(activity, range).await?;

        Ok(vec![after])
    }

    #[instrument(skip(self, timesheet), fields(user = %timesheet.user_id, week = %timesheet.week))]
    async fn persist_timesheet_week(
        &self,
        timesheet: Timesheet,
    ) -> Result<TimesheetSaveOutcome, TimesheetError> {
        for batch in &timesheet.batches {
            reconcile::validate_hours(&batch.entries)?;
        }

        let mut outcome = TimesheetSaveOutcome::default();

        for batch in timesheet.batches {
            match self
                .validate_and_persist(&batch.activity, batch.entries, timesheet.week)
                .await
            {
                Ok(statuses) => outcome.accepted.extend(statuses),
                Err(TimesheetError::OverBudget(status)) => outcome.over_budget.push(*status),
                Err(err) => return Err(err),
            }
        }

        if let Some(comments) = &self.comments {
            let week_start = timesheet.week.start();
            match timesheet.comment.filter(|text| !text.trim().is_empty()) {
                Some(text) => {
                    comments
                        .save_comment(TimesheetComment {
                            user_id: timesheet.user_id,
                            week_start,
                            text,
                        })
                        .await?
                }
                None => {
                    comments
                        .delete_comment(&timesheet.user_id, week_start)
                        .await?
                }
            }
        }

        Ok(outcome)
    }

    async fn get_activity(&self, id: &ActivityId) -> Result<Activity, TimesheetError> {
        self.catalog
            .get_activity(id)
            .await?
            .ok_or_else(|| TimesheetError::ActivityNotFound(id.to_string()))
    }

    async fn get_entries(
        &self,
        activity_id: &ActivityId,
        range: DateRange,
    ) -> Result<Vec<TimesheetEntry>, TimesheetError> {
        let entries = self.entries.get_entries_in_range(activity_id, &range).await?;
        Ok(entries
            .into_iter()
            .sorted_by_key(TimesheetEntry::date)
            .collect())
    }

    async fn get_activity_status(
        &self,
        activity: &Activity,
    ) -> Result<ActivityStatus, TimesheetError> {
        self.oracle.get_activity_status(activity).await
    }

    async fn get_approval_statuses(
        &self,
        user_id: &UserId,
        customer_id: &CustomerId,
        range: DateRange,
    ) -> Result<Vec<ApprovalStatus>, TimesheetError> {
        self.approvals
            .get_for_user_working_for_customer(user_id, customer_id, &range)
            .await
    }

    async fn get_comment(
        &self,
        user_id: &UserId,
        week_start: Date,
    ) -> Result<Option<TimesheetComment>, TimesheetError> {
        match &self.comments {
            Some(comments) => comments.get_comment(user_id, week_start).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use time::macros::date;

    use super::*;
    use crate::adapters::outbound::memory::{
        MemoryActivityCatalog, MemoryActivityStatusOracle, MemoryApprovalStatusStore,
        MemoryCommentStore, MemoryEntryStore,
    };
    use crate::domain::models::{
        ActivityBatch, ApprovalStatusType, Customer, EntryKey, Project, User,
    };

    /// Oracle that counts how often the service asks for a status.
    struct CountingOracle {
        inner: MemoryActivityStatusOracle,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ActivityStatusOracle for CountingOracle {
        async fn get_activity_status(
            &self,
            activity: &Activity,
        ) -> Result<ActivityStatus, TimesheetError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.get_activity_status(activity).await
        }
    }

    type Service = TimesheetServiceImpl<
        MemoryEntryStore,
        CountingOracle,
        MemoryApprovalStatusStore,
        MemoryActivityCatalog,
        MemoryCommentStore,
    >;

    struct Fixture {
        entries: Arc<MemoryEntryStore>,
        oracle: Arc<CountingOracle>,
        approvals: Arc<MemoryApprovalStatusStore>,
        comments: Arc<MemoryCommentStore>,
        service: Service,
    }

    fn activity(id: &str, allotted_hours: Option<f64>) -> Activity {
        let customer = Customer::new("ACME", "Acme Corp");
        let project = Project::new("acme-portal", "Portal", customer)
            .with_project_manager(User::new(2, "Marit"));
        let activity = Activity::new(id, "Development", project, User::new(1, "Ana"));
        match allotted_hours {
            Some(hours) => activity.with_allotted_hours(hours),
            None => activity,
        }
    }

    fn entry(date: Date, hours: Option<f64>) -> TimesheetEntry {
        TimesheetEntry::new("act-1", date, hours)
    }

    fn fixture(activities: Vec<Activity>, existing: Vec<TimesheetEntry>) -> Fixture {
        let entries = Arc::new(MemoryEntryStore::new().with_entries(existing));
        let oracle = Arc::new(CountingOracle {
            inner: MemoryActivityStatusOracle::new(entries.clone()),
            calls: AtomicUsize::new(0),
        });
        let approvals = Arc::new(MemoryApprovalStatusStore::new());
        let comments = Arc::new(MemoryCommentStore::new());
        let catalog = Arc::new(MemoryActivityCatalog::new().with_activities(activities));

        let service = TimesheetServiceImpl::new(
            entries.clone(),
            oracle.clone(),
            approvals.clone(),
            catalog,
        )
        .with_comment_store(comments.clone());

        Fixture {
            entries,
            oracle,
            approvals,
            comments,
            service,
        }
    }

    fn stored_hours(fixture: &Fixture, date: Date) -> Option<f64> {
        fixture
            .entries
            .get(&EntryKey::new("act-1", date))
            .unwrap()
            .and_then(|entry| entry.hours)
    }

    fn oracle_calls(fixture: &Fixture) -> usize {
        fixture.oracle.calls.load(Ordering::Relaxed)
    }

    #[tokio::test]
    async fn persists_timesheet_and_creates_approval_status_first_time() {
        let act = activity("act-1", None);
        let fixture = fixture(
            vec![act.clone()],
            vec![
                entry(date!(2008 - 04 - 01), Some(5.0)),
                entry(date!(2008 - 04 - 02), Some(5.0)),
            ],
        );
        let month = DateRange::for_month(date!(2008 - 04 - 01));

        let statuses = fixture
            .service
            .validate_and_persist(
                &act,
                vec![
                    entry(date!(2008 - 04 - 01), Some(8.0)),
                    entry(date!(2008 - 04 - 02), None),
                ],
                month,
            )
            .await
            .unwrap();

        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 01)), Some(8.0));
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 02)), None);
        assert_eq!(fixture.entries.writes(), 2);
        assert_eq!(oracle_calls(&fixture), 2);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].booked_hours, 8.0);

        let approvals = fixture.approvals.all().unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].status, ApprovalStatusType::InProgress);
        assert_eq!(approvals[0].user_id, UserId::new(1));
        assert_eq!(approvals[0].customer_id, CustomerId::new("ACME"));
        assert_eq!(approvals[0].date_range, month);
    }

    #[tokio::test]
    async fn second_save_in_scope_does_not_duplicate_approval_status() {
        let act = activity("act-1", None);
        let fixture = fixture(vec![act.clone()], vec![]);
        let week = DateRange::for_week(date!(2008 - 04 - 01));

        for hours in [4.0, 6.0] {
            fixture
                .service
                .validate_and_persist(&act, vec![entry(date!(2008 - 04 - 01), Some(hours))], week)
                .await
                .unwrap();
        }

        let approvals = fixture.approvals.all().unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 01)), Some(6.0));
    }

    #[tokio::test]
    async fn existing_approval_status_keeps_its_state() {
        let act = activity("act-1", None);
        let fixture = fixture(vec![act.clone()], vec![]);
        let week = DateRange::for_week(date!(2008 - 04 - 01));

        let mut approved = ApprovalStatus::in_progress(UserId::new(1), CustomerId::new("ACME"), week);
        approved.status = ApprovalStatusType::Approved;
        fixture.approvals.persist(approved).await.unwrap();

        fixture
            .service
            .validate_and_persist(&act, vec![entry(date!(2008 - 04 - 02), Some(2.0))], week)
            .await
            .unwrap();

        let approvals = fixture.approvals.all().unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].status, ApprovalStatusType::Approved);
    }

    #[tokio::test]
    async fn increase_over_budget_fails_without_writing() {
        let act = activity("act-1", Some(12.0));
        let fixture = fixture(
            vec![act.clone()],
            vec![
                entry(date!(2008 - 04 - 01), Some(5.0)),
                entry(date!(2008 - 04 - 02), Some(5.0)),
            ],
        );

        let result = fixture
            .service
            .validate_and_persist(
                &act,
                vec![entry(date!(2008 - 04 - 01), Some(8.0))],
                DateRange::for_week(date!(2008 - 04 - 01)),
            )
            .await;

        match result {
            Err(TimesheetError::OverBudget(projected)) => {
                assert_eq!(projected.booked_hours, 13.0);
                assert!(!projected.is_valid());
            }
            other => panic!("expected over budget, got {other:?}"),
        }
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 01)), Some(5.0));
        assert_eq!(fixture.entries.writes(), 0);
        assert_eq!(oracle_calls(&fixture), 1);
        assert!(fixture.approvals.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn decreasing_an_overrun_succeeds() {
        let act = activity("act-1", Some(5.0));
        let fixture = fixture(vec![act.clone()], vec![entry(date!(2008 - 04 - 03), Some(8.0))]);
        let day = DateRange::single_day(date!(2008 - 04 - 03));

        let statuses = fixture
            .service
            .validate_and_persist(&act, vec![entry(date!(2008 - 04 - 03), Some(7.0))], day)
            .await
            .unwrap();

        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 03)), Some(7.0));
        assert!(!statuses[0].is_valid());
        assert_eq!(statuses[0].remaining_hours(), Some(-2.0));
        assert_eq!(fixture.approvals.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn increasing_an_overrun_fails() {
        let act = activity("act-1", Some(5.0));
        let fixture = fixture(vec![act.clone()], vec![entry(date!(2008 - 04 - 03), Some(8.0))]);

        let result = fixture
            .service
            .validate_and_persist(
                &act,
                vec![entry(date!(2008 - 04 - 03), Some(9.0))],
                DateRange::single_day(date!(2008 - 04 - 03)),
            )
            .await;

        assert!(matches!(result, Err(TimesheetError::OverBudget(_))));
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 03)), Some(8.0));
    }

    #[tokio::test]
    async fn negative_hours_cannot_offset_an_overrun() {
        let act = activity("act-1", Some(10.0));
        let fixture = fixture(vec![act.clone()], vec![]);

        let result = fixture
            .service
            .validate_and_persist(
                &act,
                vec![
                    entry(date!(2008 - 04 - 01), Some(30.0)),
                    entry(date!(2008 - 04 - 02), Some(-25.0)),
                ],
                DateRange::for_week(date!(2008 - 04 - 01)),
            )
            .await;

        assert!(matches!(
            result,
            Err(TimesheetError::InvalidHours { hours, .. }) if hours == 30.0
        ));
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 01)), None);
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 02)), None);
        assert_eq!(fixture.entries.writes(), 0);
        assert_eq!(oracle_calls(&fixture), 0);
        assert!(fixture.approvals.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn overrun_batch_with_net_decrease_succeeds() {
        // One day goes up, another is cleared; the total still drops.
        let act = activity("act-1", Some(8.0));
        let fixture = fixture(
            vec![act.clone()],
            vec![
                entry(date!(2008 - 04 - 01), Some(5.0)),
                entry(date!(2008 - 04 - 02), Some(5.0)),
            ],
        );

        let statuses = fixture
            .service
            .validate_and_persist(
                &act,
                vec![
                    entry(date!(2008 - 04 - 01), Some(8.0)),
                    entry(date!(2008 - 04 - 02), None),
                ],
                DateRange::for_week(date!(2008 - 04 - 01)),
            )
            .await
            .unwrap();

        assert_eq!(statuses[0].booked_hours, 8.0);
        assert!(statuses[0].is_valid());
    }

    #[tokio::test]
    async fn entries_outside_the_range_are_reconciled() {
        let act = activity("act-1", None);
        let fixture = fixture(vec![act.clone()], vec![entry(date!(2008 - 04 - 20), Some(4.0))]);

        fixture
            .service
            .validate_and_persist(
                &act,
                vec![entry(date!(2008 - 04 - 20), None)],
                DateRange::for_week(date!(2008 - 04 - 01)),
            )
            .await
            .unwrap();

        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 20)), None);
    }

    #[tokio::test]
    async fn week_save_collects_over_budget_activities() {
        let capped = activity("act-1", Some(4.0));
        let open = activity("act-2", None);
        let fixture = fixture(vec![capped.clone(), open.clone()], vec![]);
        let week = DateRange::for_week(date!(2008 - 04 - 01));

        let outcome = fixture
            .service
            .persist_timesheet_week(Timesheet {
                user_id: UserId::new(1),
                week,
                batches: vec![
                    ActivityBatch {
                        activity: capped,
                        entries: vec![entry(date!(2008 - 04 - 01), Some(8.0))],
                    },
                    ActivityBatch {
                        activity: open,
                        entries: vec![TimesheetEntry::new("act-2", date!(2008 - 04 - 01), Some(6.0))],
                    },
                ],
                comment: Some("Release week".to_string()),
            })
            .await
            .unwrap();

        assert!(!outcome.is_complete());
        assert_eq!(outcome.over_budget.len(), 1);
        assert_eq!(outcome.over_budget[0].activity_id, ActivityId::new("act-1"));
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].booked_hours, 6.0);
        assert_eq!(stored_hours(&fixture, date!(2008 - 04 - 01)), None);

        let comment = fixture
            .service
            .get_comment(&UserId::new(1), week.start())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(comment.text, "Release week");
    }

    #[tokio::test]
    async fn blank_week_comment_removes_stored_comment() {
        let fixture = fixture(vec![], vec![]);
        let week = DateRange::for_week(date!(2008 - 04 - 01));
        fixture
            .comments
            .save_comment(TimesheetComment {
                user_id: UserId::new(1),
                week_start: week.start(),
                text: "old".to_string(),
            })
            .await
            .unwrap();

        let outcome = fixture
            .service
            .persist_timesheet_week(Timesheet {
                user_id: UserId::new(1),
                week,
                batches: vec![],
                comment: Some("   ".to_string()),
            })
            .await
            .unwrap();

        assert!(outcome.is_complete());
        assert!(fixture
            .comments
            .get_comment(&UserId::new(1), week.start())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let fixture = fixture(vec![], vec![]);
        let result = fixture.service.get_activity(&ActivityId::new("nope")).await;
        assert!(matches!(result, Err(TimesheetError::ActivityNotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn entries_are_returned_in_date_order() {
        let fixture = fixture(
            vec![],
            vec![
                entry(date!(2008 - 04 - 03), Some(3.0)),
                entry(date!(2008 - 04 - 01), Some(1.0)),
            ],
        );

        let entries = fixture
            .service
            .get_entries(
                &ActivityId::new("act-1"),
                DateRange::for_week(date!(2008 - 04 - 01)),
            )
            .await
            .unwrap();

        let dates: Vec<Date> = entries.iter().map(TimesheetEntry::date).collect();
        assert_eq!(dates, vec![date!(2008 - 04 - 01), date!(2008 - 04 - 03)]);
    }

    /// Entry store whose writes always fail.
    struct BrokenEntryStore;

    #[async_trait]
    impl EntryStore for BrokenEntryStore {
        async fn delete(&self, _key: &EntryKey) -> Result<(), TimesheetError> {
            Err(TimesheetError::storage("disk full"))
        }

        async fn merge(&self, _entry: TimesheetEntry) -> Result<TimesheetEntry, TimesheetError> {
            Err(TimesheetError::storage("disk full"))
        }

        async fn get_entries_in_range(
            &self,
            _activity_id: &ActivityId,
            _range: &DateRange,
        ) -> Result<Vec<TimesheetEntry>, TimesheetError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn storage_errors_propagate_unchanged() {
        let act = activity("act-1", None);
        let oracle = Arc::new(MemoryActivityStatusOracle::new(Arc::new(MemoryEntryStore::new())));
        let approvals = Arc::new(MemoryApprovalStatusStore::new());
        let service = TimesheetServiceImpl::new(
            Arc::new(BrokenEntryStore),
            oracle,
            approvals.clone(),
            Arc::new(MemoryActivityCatalog::new()),
        );

        let result = service
            .validate_and_persist(
                &act,
                vec![entry(date!(2008 - 04 - 01), Some(1.0))],
                DateRange::single_day(date!(2008 - 04 - 01)),
            )
            .await;

        assert!(matches!(result, Err(TimesheetError::Storage(msg)) if msg == "disk full"));
        assert!(approvals.all().unwrap().is_empty());
    }
}
