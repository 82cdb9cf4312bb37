use crate::database::error::DatabaseError::ConnectionFailed;
use crate::database::{DbConnection, DbPool, dao};
use crate::live::registry::SubscriberRegistry;
use crate::member::due_date::{DUE_SOON_DAYS, compute_due_date, payment_status};
use crate::member::error::MemberError::{DuplicateKey, NotFound, StorageUnavailable, Validation};
use crate::member::error::Result;
use crate::member::pagination::{PageInfo, PageRequest};
use crate::member::validation::{validate_input, validate_update};
use crate::tools::log_message_and_return;
use chrono::{Days, NaiveDate};
use dto::live_event::ServerEvent;
use dto::member::Member;
use dto::member_due::{MemberDue, PaymentStatus};
use dto::member_input::MemberInput;
use dto::member_update::MemberUpdate;
use dto::members_page::MembersPage;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Entry point for every read and write on members.
/// Each successful write is followed by a broadcast of the full member list to live subscribers.
#[derive(Clone)]
pub struct MemberService {
    pool: DbPool,
    registry: Arc<SubscriberRegistry>,
}

impl MemberService {
    pub fn new(pool: DbPool, registry: Arc<SubscriberRegistry>) -> Self {
        Self { pool, registry }
    }

    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Register a new member, due 30 days after its payment.
    /// Members sharing a national ID are rejected and nothing is broadcast.
    pub fn create(&self, input: MemberInput) -> Result<Member> {
        validate_input(&input)?;
        let due_date = compute_due_date(*input.payment_date()).ok_or_else(|| {
            Validation(format!(
                "no due date can follow payment date {}",
                input.payment_date()
            ))
        })?;

        let mut connection = self.connection()?;
        let member = dao::member::insert_if_absent(&mut connection, &input, due_date)?
            .ok_or_else(|| {
                warn!(
                    "Member not created, national ID already known [dni: {}]",
                    input.national_id()
                );
                DuplicateKey
            })?;
        info!("Member created [id: {}]", member.id());

        self.broadcast_members(&mut connection);
        Ok(member)
    }

    /// Overwrite the fields carried by `update`.
    /// The due date only changes when `update` carries one.
    pub fn update(&self, id: &str, update: MemberUpdate) -> Result<Member> {
        validate_update(&update)?;
        if update.is_empty() {
            debug!("Nothing to change but the update timestamp [id: {id}]");
        }

        let mut connection = self.connection()?;
        let member = dao::member::update_member(&mut connection, id, &update)?
            .ok_or_else(|| NotFound(id.to_owned()))?;
        info!("Member updated [id: {id}]");

        self.broadcast_members(&mut connection);
        Ok(member)
    }

    /// Deleting an unknown member isn't an error: the list is broadcast all the same.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut connection = self.connection()?;
        let count = dao::member::delete_member(&mut connection, id)?;
        if count == 0 {
            debug!("No member to delete [id: {id}]");
        } else {
            info!("Member deleted [id: {id}]");
        }

        self.broadcast_members(&mut connection);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Member> {
        let mut connection = self.connection()?;
        dao::member::retrieve_member(&mut connection, id)?.ok_or_else(|| NotFound(id.to_owned()))
    }

    /// All members, or only those whose first name contains `name_filter`, ignoring case.
    pub fn list(&self, name_filter: Option<&str>) -> Result<Vec<Member>> {
        let mut connection = self.connection()?;
        Ok(dao::member::retrieve_members(&mut connection, name_filter)?)
    }

    pub fn paginate(&self, request: &PageRequest) -> Result<MembersPage> {
        let mut connection = self.connection()?;
        let name_filter = request.name_filter().as_deref();
        let total_members = dao::member::count_members(&mut connection, name_filter)?;
        let members = dao::member::retrieve_members_page(
            &mut connection,
            name_filter,
            *request.sort(),
            request.offset(),
            *request.page_size(),
        )?;
        let info = PageInfo::new(total_members, *request.page(), *request.page_size());

        Ok(MembersPage::new(
            members,
            *info.has_prev_page(),
            *info.has_next_page(),
            *info.prev_page(),
            *info.next_page(),
            *info.page(),
            *info.total_pages(),
            total_members,
        ))
    }

    /// Members whose payment has lapsed or is about to, as of `today`.
    pub fn dues(&self, today: NaiveDate) -> Result<Vec<MemberDue>> {
        let horizon = today
            .checked_add_days(Days::new(DUE_SOON_DAYS))
            .unwrap_or(NaiveDate::MAX);

        let mut connection = self.connection()?;
        let members = dao::member::retrieve_members_due_by(&mut connection, horizon)?;

        Ok(members
            .into_iter()
            .map(|member| {
                let status = payment_status(*member.due_date(), today);
                MemberDue::new(member, status)
            })
            .filter(|due| *due.status() != PaymentStatus::UpToDate)
            .collect())
    }

    fn connection(&self) -> Result<DbConnection> {
        self.pool.get().map_err(log_message_and_return(
            "Can't get a database connection",
            StorageUnavailable(ConnectionFailed),
        ))
    }

    /// The write has already happened: a failure here is only logged.
    fn broadcast_members(&self, connection: &mut DbConnection) {
        match dao::member::retrieve_members(connection, None) {
            Ok(members) => {
                let reached = self.registry.broadcast(ServerEvent::Members(members));
                debug!("Member list broadcast [subscribers: {reached}]");
            }
            Err(error) => error!("Can't reload members to broadcast them\n{error:#?}"),
        }
    }
}
