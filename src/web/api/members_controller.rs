use crate::member::service::MemberService;
use crate::web::error::to_status;
use chrono::Utc;
use dto::member::Member;
use dto::member_due::MemberDue;
use dto::member_input::MemberInput;
use dto::member_update::MemberUpdate;
use log::debug;
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::{self, Json};

/// List every member, optionally keeping only those whose first name contains `nombre`.
#[get("/alumnos?<nombre>")]
pub async fn list_members(
    service: &State<MemberService>,
    nombre: Option<&str>,
) -> Result<Json<Vec<Member>>, Status> {
    let members = service.list(nombre).map_err(to_status)?;

    Ok(Json(members))
}

/// Members whose payment has lapsed or lapses within a few days.
#[get("/alumnos/vencimientos")]
pub async fn list_dues(service: &State<MemberService>) -> Result<Json<Vec<MemberDue>>, Status> {
    let dues = service
        .dues(Utc::now().date_naive())
        .map_err(to_status)?;

    Ok(Json(dues))
}

#[get("/alumnos/<id>")]
pub async fn get_member(service: &State<MemberService>, id: &str) -> Result<Json<Member>, Status> {
    let member = service.get(id).map_err(to_status)?;

    Ok(Json(member))
}

#[post("/alumnos", data = "<member>")]
pub async fn create_member(
    service: &State<MemberService>,
    member: Result<Json<MemberInput>, json::Error<'_>>,
) -> Result<Created<Json<Member>>, Status> {
    let input = read_body(member)?;
    let member = service.create(input).map_err(to_status)?;

    Ok(Created::new(format!("/api/alumnos/{}", member.id())).body(Json(member)))
}

/// Only the fields present in the body are changed.
#[put("/alumnos/<id>", data = "<update>")]
pub async fn update_member(
    service: &State<MemberService>,
    id: &str,
    update: Result<Json<MemberUpdate>, json::Error<'_>>,
) -> Result<Json<Member>, Status> {
    let update = read_body(update)?;
    let member = service.update(id, update).map_err(to_status)?;

    Ok(Json(member))
}

/// Deleting a member that doesn't exist succeeds as well.
#[delete("/alumnos/<id>")]
pub async fn delete_member(service: &State<MemberService>, id: &str) -> Result<Status, Status> {
    service.delete(id).map_err(to_status)?;

    Ok(Status::NoContent)
}

/// Any unreadable body is a bad request, be it malformed JSON or a missing field.
/// The content type isn't checked: bodies are always read as JSON.
fn read_body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, Status> {
    body.map(Json::into_inner).map_err(|error| {
        debug!("Unreadable request body\n{error:?}");
        Status::BadRequest
    })
}
