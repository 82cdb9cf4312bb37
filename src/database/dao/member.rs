use super::Result;
use crate::database::functions::unicode_lower;
use crate::database::model::member::{Member, MemberChangeset, format_date};
use crate::database::schema::member;
use crate::member::pagination::SortDirection;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use dto::member_input::MemberInput;
use dto::member_update::MemberUpdate;

const LIKE_ESCAPE: char = '\\';

/// Insert a new member unless its national ID is already known.
/// The check and the insertion are a single statement, backed by the unique index.
/// Return `None` when a member with the same national ID already exists.
pub fn insert_if_absent(
    connection: &mut SqliteConnection,
    input: &MemberInput,
    due_date: NaiveDate,
) -> Result<Option<dto::member::Member>> {
    let record = Member::new_record(input, due_date, Utc::now().naive_utc());
    let inserted = diesel::insert_into(member::table)
        .values(&record)
        .on_conflict(member::national_id)
        .do_nothing()
        .execute(connection)?;

    if inserted == 0 {
        return Ok(None);
    }

    retrieve_member(connection, record.id())
}

pub fn retrieve_member(
    connection: &mut SqliteConnection,
    member_id: &str,
) -> Result<Option<dto::member::Member>> {
    let result = member::table
        .find(member_id)
        .select(Member::as_select())
        .first(connection)
        .optional()?;

    Ok(result.map(dto::member::Member::try_from).transpose()?)
}

/// Retrieve members in insertion order,
/// optionally keeping only those whose first name contains `name_filter`, ignoring case.
pub fn retrieve_members(
    connection: &mut SqliteConnection,
    name_filter: Option<&str>,
) -> Result<Vec<dto::member::Member>> {
    let results = filtered_by_name(name_filter)
        .order((member::created_at.asc(), member::id.asc()))
        .select(Member::as_select())
        .load(connection)?;

    to_dto(results)
}

pub fn count_members(connection: &mut SqliteConnection, name_filter: Option<&str>) -> Result<u64> {
    let count: i64 = filtered_by_name(name_filter).count().get_result(connection)?;

    Ok(u64::try_from(count).unwrap_or_default())
}

pub fn retrieve_members_page(
    connection: &mut SqliteConnection,
    name_filter: Option<&str>,
    sort: Option<SortDirection>,
    offset: u64,
    limit: u32,
) -> Result<Vec<dto::member::Member>> {
    let query = filtered_by_name(name_filter);
    let query = match sort {
        Some(SortDirection::Ascending) => {
            query.order((member::first_name.asc(), member::created_at.asc()))
        }
        Some(SortDirection::Descending) => {
            query.order((member::first_name.desc(), member::created_at.asc()))
        }
        None => query.order((member::created_at.asc(), member::id.asc())),
    };

    let results = query
        .offset(i64::try_from(offset).unwrap_or(i64::MAX))
        .limit(i64::from(limit))
        .select(Member::as_select())
        .load(connection)?;

    to_dto(results)
}

/// Members whose due date is `date` or earlier, the oldest due date first.
pub fn retrieve_members_due_by(
    connection: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Vec<dto::member::Member>> {
    let results = member::table
        .filter(member::due_date.le(format_date(date)))
        .order((member::due_date.asc(), member::first_name.asc()))
        .select(Member::as_select())
        .load(connection)?;

    to_dto(results)
}

/// Apply `update` to the member identified by `member_id`.
/// Return `None` if there is no such member.
pub fn update_member(
    connection: &mut SqliteConnection,
    member_id: &str,
    update: &MemberUpdate,
) -> Result<Option<dto::member::Member>> {
    let changeset = MemberChangeset::new(update, Utc::now().naive_utc());
    let updated = diesel::update(member::table.find(member_id))
        .set(&changeset)
        .execute(connection)?;

    if updated == 0 {
        return Ok(None);
    }

    retrieve_member(connection, member_id)
}

/// Return the number of deleted members: 0 when the member was already gone.
pub fn delete_member(connection: &mut SqliteConnection, member_id: &str) -> Result<usize> {
    let count = diesel::delete(member::table.find(member_id)).execute(connection)?;

    Ok(count)
}

fn filtered_by_name<'a>(name_filter: Option<&str>) -> member::BoxedQuery<'a, Sqlite> {
    let mut query = member::table.into_boxed();
    if let Some(name) = name_filter.map(str::trim).filter(|name| !name.is_empty()) {
        query = query.filter(
            unicode_lower(member::first_name)
                .like(contains_pattern(&name.to_lowercase()))
                .escape(LIKE_ESCAPE),
        );
    }

    query
}

/// Both sides are lowercased beforehand: SQLite's `LIKE` only ignores case for ASCII letters.
/// Wildcards typed by users are taken literally.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace(LIKE_ESCAPE, "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

fn to_dto(results: Vec<Member>) -> Result<Vec<dto::member::Member>> {
    results
        .into_iter()
        .map(dto::member::Member::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::database::dao::member::insert_if_absent;
    use chrono::NaiveDate;
    use diesel::SqliteConnection;
    use dto::member_input::MemberInput;
    use dto::member_input::tests::{ana, bruno, juan};

    fn due_date(input: &MemberInput) -> NaiveDate {
        *input.payment_date() + chrono::Days::new(30)
    }

    fn populate_db(connection: &mut SqliteConnection) -> Vec<dto::member::Member> {
        [ana(), bruno(), juan()]
            .iter()
            .map(|input| {
                insert_if_absent(connection, input, due_date(input))
                    .unwrap()
                    .unwrap()
            })
            .collect()
    }

    mod insert_if_absent {
        use crate::database::dao::member::tests::due_date;
        use crate::database::dao::member::{insert_if_absent, retrieve_members};
        use crate::database::with_temp_database;
        use chrono::NaiveDate;
        use dto::member_input::tests::{ana, ana_impostor};

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let member = insert_if_absent(&mut connection, &ana(), due_date(&ana()))
                    .unwrap()
                    .unwrap();

                assert!(!member.id().is_empty());
                assert_eq!("Ana", member.first_name());
                assert_eq!("García", member.last_name());
                assert_eq!("111", member.national_id());
                assert_eq!(&NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), member.due_date());
                assert_eq!(member.created_at(), member.updated_at());
                assert_eq!(vec![member], retrieve_members(&mut connection, None).unwrap());
            })
        }

        #[test]
        fn none_when_national_id_already_exists() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                insert_if_absent(&mut connection, &ana(), due_date(&ana())).unwrap();

                let result =
                    insert_if_absent(&mut connection, &ana_impostor(), due_date(&ana_impostor()))
                        .unwrap();

                assert_eq!(None, result);
                let members = retrieve_members(&mut connection, None).unwrap();
                assert_eq!(1, members.len());
                assert_eq!("Ana", members[0].first_name());
            })
        }
    }

    mod retrieve_member {
        use crate::database::dao::member::retrieve_member;
        use crate::database::dao::member::tests::populate_db;
        use crate::database::with_temp_database;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let members = populate_db(&mut connection);

                let result = retrieve_member(&mut connection, members[1].id()).unwrap();
                assert_eq!(Some(members[1].clone()), result);
            })
        }

        #[test]
        fn none_when_unknown() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result = retrieve_member(&mut connection, "unknown").unwrap();
                assert_eq!(None, result);
            })
        }
    }

    mod retrieve_members {
        use crate::database::dao::member::retrieve_members;
        use crate::database::dao::member::tests::populate_db;
        use crate::database::with_temp_database;
        use parameterized::{ide, parameterized};

        ide!();

        #[test]
        fn success_in_insertion_order() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let expected_members = populate_db(&mut connection);

                let result = retrieve_members(&mut connection, None).unwrap();
                assert_eq!(expected_members, result);
            })
        }

        #[parameterized(
            filter = {"an", "AN", "  an ", "bru", "u", "", "zz", "%", "_"},
            expected_names = {vec!["Ana", "Juan"], vec!["Ana", "Juan"], vec!["Ana", "Juan"], vec!["Bruno"], vec!["Bruno", "Juan"], vec!["Ana", "Bruno", "Juan"], vec![], vec![], vec![]}
        )]
        fn filtered_by_name(filter: &str, expected_names: Vec<&str>) {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result = retrieve_members(&mut connection, Some(filter)).unwrap();
                let names = result
                    .iter()
                    .map(|member| member.first_name().as_str())
                    .collect::<Vec<_>>();
                assert_eq!(expected_names, names);
            })
        }
    }

    mod retrieve_members_with_accents {
        use crate::database::dao::member::tests::{due_date, populate_db};
        use crate::database::dao::member::{count_members, insert_if_absent, retrieve_members};
        use crate::database::with_temp_database;
        use chrono::NaiveDate;
        use dto::member_input::MemberInput;
        use parameterized::{ide, parameterized};

        ide!();

        fn member(first_name: &str, national_id: &str) -> MemberInput {
            MemberInput::new(
                first_name.to_owned(),
                "".to_owned(),
                national_id.to_owned(),
                None,
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                None,
            )
        }

        #[parameterized(
            filter = {"ángela", "ÁNGELA", "Ángel", "ñi", "ÍÑIGO", "angela"},
            expected_names = {vec!["Ángela"], vec!["Ángela"], vec!["Ángela"], vec!["Íñigo"], vec!["Íñigo"], vec![]}
        )]
        fn filtered_ignoring_case(filter: &str, expected_names: Vec<&str>) {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);
                for input in [member("Ángela", "444"), member("Íñigo", "555")] {
                    insert_if_absent(&mut connection, &input, due_date(&input)).unwrap();
                }

                let result = retrieve_members(&mut connection, Some(filter)).unwrap();
                let names = result
                    .iter()
                    .map(|member| member.first_name().as_str())
                    .collect::<Vec<_>>();
                assert_eq!(expected_names, names);
                assert_eq!(
                    expected_names.len() as u64,
                    count_members(&mut connection, Some(filter)).unwrap()
                );
            })
        }
    }

    mod count_members {
        use crate::database::dao::member::count_members;
        use crate::database::dao::member::tests::populate_db;
        use crate::database::with_temp_database;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                assert_eq!(0, count_members(&mut connection, None).unwrap());

                populate_db(&mut connection);
                assert_eq!(3, count_members(&mut connection, None).unwrap());
                assert_eq!(2, count_members(&mut connection, Some("an")).unwrap());
            })
        }
    }

    mod retrieve_members_page {
        use crate::database::dao::member::retrieve_members_page;
        use crate::database::dao::member::tests::populate_db;
        use crate::database::with_temp_database;
        use crate::member::pagination::SortDirection;

        fn names(members: &[dto::member::Member]) -> Vec<&str> {
            members
                .iter()
                .map(|member| member.first_name().as_str())
                .collect()
        }

        #[test]
        fn unsorted() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let first_page =
                    retrieve_members_page(&mut connection, None, None, 0, 2).unwrap();
                let second_page =
                    retrieve_members_page(&mut connection, None, None, 2, 2).unwrap();

                assert_eq!(vec!["Ana", "Bruno"], names(&first_page));
                assert_eq!(vec!["Juan"], names(&second_page));
            })
        }

        #[test]
        fn sorted_descending() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result = retrieve_members_page(
                    &mut connection,
                    None,
                    Some(SortDirection::Descending),
                    0,
                    5,
                )
                .unwrap();

                assert_eq!(vec!["Juan", "Bruno", "Ana"], names(&result));
            })
        }

        #[test]
        fn sorted_ascending_and_filtered() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result = retrieve_members_page(
                    &mut connection,
                    Some("u"),
                    Some(SortDirection::Ascending),
                    0,
                    5,
                )
                .unwrap();

                assert_eq!(vec!["Bruno", "Juan"], names(&result));
            })
        }

        #[test]
        fn empty_past_last_page() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result = retrieve_members_page(&mut connection, None, None, 10, 5).unwrap();

                assert!(result.is_empty());
            })
        }
    }

    mod retrieve_members_due_by {
        use crate::database::dao::member::retrieve_members_due_by;
        use crate::database::dao::member::tests::populate_db;
        use crate::database::with_temp_database;
        use chrono::NaiveDate;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                // Juan is due on 2024-01-14, Ana on 2024-01-31, Bruno on 2024-03-16.
                let result = retrieve_members_due_by(
                    &mut connection,
                    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                )
                .unwrap();

                let names = result
                    .iter()
                    .map(|member| member.first_name().as_str())
                    .collect::<Vec<_>>();
                assert_eq!(vec!["Juan", "Ana"], names);
            })
        }
    }

    mod update_member {
        use crate::database::dao::member::tests::populate_db;
        use crate::database::dao::member::update_member;
        use crate::database::error::DatabaseError;
        use crate::database::with_temp_database;
        use chrono::NaiveDate;
        use dto::member_update::MemberUpdate;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let members = populate_db(&mut connection);
                let ana = &members[0];
                let update = MemberUpdate::new(
                    None,
                    Some("López".to_owned()),
                    None,
                    None,
                    NaiveDate::from_ymd_opt(2024, 6, 1),
                    None,
                    None,
                );

                let updated = update_member(&mut connection, ana.id(), &update)
                    .unwrap()
                    .unwrap();

                assert_eq!(ana.id(), updated.id());
                assert_eq!("Ana", updated.first_name());
                assert_eq!("López", updated.last_name());
                assert_eq!(
                    &NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    updated.payment_date()
                );
                // The due date is kept as long as it isn't given explicitly.
                assert_eq!(ana.due_date(), updated.due_date());
                assert_eq!(ana.created_at(), updated.created_at());
                assert!(updated.updated_at() >= ana.updated_at());
            })
        }

        #[test]
        fn none_when_unknown() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection);

                let result =
                    update_member(&mut connection, "unknown", &MemberUpdate::default()).unwrap();
                assert_eq!(None, result);
            })
        }

        #[test]
        fn duplicate_key_when_national_id_is_taken() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let members = populate_db(&mut connection);
                let update = MemberUpdate::new(
                    None,
                    None,
                    Some(members[1].national_id().clone()),
                    None,
                    None,
                    None,
                    None,
                );

                let result = update_member(&mut connection, members[0].id(), &update);
                assert_eq!(Err(DatabaseError::DuplicateKey), result);
            })
        }
    }

    mod delete_member {
        use crate::database::dao::member::tests::populate_db;
        use crate::database::dao::member::{delete_member, retrieve_members};
        use crate::database::with_temp_database;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let members = populate_db(&mut connection);

                let result = delete_member(&mut connection, members[0].id()).unwrap();
                assert_eq!(1, result);
                assert_eq!(
                    members[1..].to_vec(),
                    retrieve_members(&mut connection, None).unwrap()
                );
            })
        }

        #[test]
        fn success_when_already_deleted() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let members = populate_db(&mut connection);

                delete_member(&mut connection, members[0].id()).unwrap();
                let result = delete_member(&mut connection, members[0].id()).unwrap();
                assert_eq!(0, result);
            })
        }
    }
}
