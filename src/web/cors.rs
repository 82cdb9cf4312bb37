use log::warn;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, Response};

const ORIGIN_HEADER: &str = "Origin";
const HOST_HEADER: &str = "Host";
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Origins allowed to call the app from a browser. `*` allows any origin.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self { origins }
    }

    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

/// Add CORS headers to responses for requests coming from an allowed origin.
/// Other responses are left untouched, which browsers read as a refusal.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(origin) = request.headers().get_one(ORIGIN_HEADER) else {
            return;
        };
        let allowed = request
            .rocket()
            .state::<AllowedOrigins>()
            .is_some_and(|origins| origins.allows(origin));
        if !allowed {
            return;
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Origin",
            origin.to_owned(),
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            ALLOWED_METHODS,
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            ALLOWED_HEADERS,
        ));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        response.set_header(Header::new("Vary", ORIGIN_HEADER));
    }
}

/// Browsers send a preflight before most cross-origin calls.
/// Headers are added by the [Cors] fairing.
#[options("/<_..>")]
pub async fn preflight() -> Status {
    Status::NoContent
}

/// Guard for endpoints browsers can reach without any CORS check, such as WebSocket upgrades.
/// Requests without `Origin` header pass: they don't come from a browser.
/// Pages served by the app itself pass as well.
pub struct AllowedOrigin;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AllowedOrigin {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(origin) = req.headers().get_one(ORIGIN_HEADER) else {
            return Outcome::Success(AllowedOrigin);
        };

        let allowed = req
            .rocket()
            .state::<AllowedOrigins>()
            .is_some_and(|origins| origins.allows(origin))
            || is_same_origin(origin, req.headers().get_one(HOST_HEADER));
        if allowed {
            Outcome::Success(AllowedOrigin)
        } else {
            warn!("Request refused, origin isn't allowed [origin: {origin}]");
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}

fn is_same_origin(origin: &str, host: Option<&str>) -> bool {
    match (origin.split_once("://"), host) {
        (Some((_, authority)), Some(host)) => authority.trim_end_matches('/') == host,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::web::cors::{AllowedOrigin, AllowedOrigins, Cors, is_same_origin, preflight};
    use parameterized::{ide, parameterized};
    use rocket::http::{Header, Status};
    use rocket::local::asynchronous::Client;
    use rocket::{Build, Rocket};

    ide!();

    const ALLOWED: &str = "http://localhost:5173";

    #[get("/guarded")]
    async fn guarded(_origin: AllowedOrigin) -> &'static str {
        "ok"
    }

    fn rocket() -> Rocket<Build> {
        rocket::build()
            .manage(AllowedOrigins::new(vec![ALLOWED.to_owned()]))
            .attach(Cors)
            .mount("/", routes![guarded, preflight])
    }

    #[parameterized(
        origin = {"http://localhost:5173", "http://localhost:5173/", "http://localhost:3000", "https://localhost:5173"},
        expected = {true, true, false, false}
    )]
    fn should_check_origin(origin: &str, expected: bool) {
        let origins = AllowedOrigins::new(vec![ALLOWED.to_owned()]);

        assert_eq!(expected, origins.allows(origin));
    }

    #[test]
    fn should_allow_any_origin_with_wildcard() {
        let origins = AllowedOrigins::new(vec!["*".to_owned()]);

        assert!(origins.allows("https://gym.com"));
    }

    #[parameterized(
        origin = {"http://gym.com:3000", "https://gym.com:3000/", "http://gym.com", "gym.com:3000"},
        host = {Some("gym.com:3000"), Some("gym.com:3000"), Some("gym.com:3000"), Some("gym.com:3000")},
        expected = {true, true, false, false}
    )]
    fn should_detect_same_origin(origin: &str, host: Option<&str>, expected: bool) {
        assert_eq!(expected, is_same_origin(origin, host));
    }

    #[async_test]
    async fn should_answer_preflight_with_cors_headers() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client
            .options("/api/alumnos/123")
            .header(Header::new("Origin", ALLOWED))
            .dispatch()
            .await;

        assert_eq!(Status::NoContent, response.status());
        assert_eq!(
            Some(ALLOWED),
            response.headers().get_one("Access-Control-Allow-Origin")
        );
        assert_eq!(
            Some("GET, POST, PUT, DELETE, OPTIONS"),
            response.headers().get_one("Access-Control-Allow-Methods")
        );
    }

    #[async_test]
    async fn should_not_add_cors_headers_for_unknown_origin() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client
            .options("/api/alumnos")
            .header(Header::new("Origin", "https://evil.com"))
            .dispatch()
            .await;

        assert_eq!(
            None,
            response.headers().get_one("Access-Control-Allow-Origin")
        );
    }

    #[async_test]
    async fn should_guard_pass_without_origin() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client.get("/guarded").dispatch().await;

        assert_eq!(Status::Ok, response.status());
    }

    #[async_test]
    async fn should_guard_pass_for_allowed_origin() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client
            .get("/guarded")
            .header(Header::new("Origin", ALLOWED))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
    }

    #[async_test]
    async fn should_guard_pass_for_same_origin() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client
            .get("/guarded")
            .header(Header::new("Origin", "http://gym.com:3000"))
            .header(Header::new("Host", "gym.com:3000"))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
    }

    #[async_test]
    async fn should_guard_refuse_unknown_origin() {
        let client = Client::tracked(rocket()).await.unwrap();

        let response = client
            .get("/guarded")
            .header(Header::new("Origin", "https://evil.com"))
            .dispatch()
            .await;

        assert_eq!(Status::Forbidden, response.status());
    }
}
