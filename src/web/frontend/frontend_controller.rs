use crate::member::pagination::{PageRequest, SortDirection};
use crate::member::service::MemberService;
use log::error;
use rocket::http::Status;
use rocket::{Request, State};
use rocket_dyn_templates::{Template, context};

#[get("/")]
pub async fn index() -> Template {
    Template::render(
        "home",
        context! {
            title: "Gimnasio"
        },
    )
}

/// Paginated member list.
/// Query values that can't be read fall back to their defaults.
#[get("/alumnos?<limit>&<page>&<sort>&<nombre>")]
pub async fn list_members(
    service: &State<MemberService>,
    limit: Option<u32>,
    page: Option<u32>,
    sort: Option<&str>,
    nombre: Option<&str>,
) -> Result<Template, (Status, &'static str)> {
    let request = PageRequest::new(
        nombre.map(str::to_owned),
        page,
        limit,
        SortDirection::from_query(sort),
    );
    let members_page = service.paginate(&request).map_err(|error| {
        error!("Can't load members page [request: {request:?}]\n{error:#?}");
        (Status::InternalServerError, "Error al cargar alumnos")
    })?;

    Ok(Template::render(
        "members",
        context! {
            title: "Alumnos",
            page: members_page,
            limit: request.page_size(),
            sort: sort.unwrap_or_default(),
            nombre: nombre.unwrap_or_default(),
        },
    ))
}

#[get("/realtimealumnos")]
pub async fn live_members() -> Template {
    Template::render(
        "live-members",
        context! {
            title: "Alumnos en tiempo real"
        },
    )
}

#[catch(404)]
pub async fn not_found(req: &Request<'_>) -> Template {
    Template::render(
        "error/404",
        context! {
            title: "Página no encontrada",
            uri: req.uri()
        },
    )
}
