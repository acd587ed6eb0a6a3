//! Cross-origin access for browser clients. Any origin may call any route.

use rocket::{
    fairing::{Fairing, Info, Kind},
    http::{Header, Status},
    Request, Response, Route,
};

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";
const DEFAULT_ALLOWED_HEADERS: &str = "Content-Type";

pub fn routes() -> Vec<Route> {
    routes![preflight]
}

/// Answer a CORS preflight for any path. The headers are added by [`CorsFairing`].
#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

/// A fairing that adds the CORS headers to every response.
#[derive(Debug, Copy, Clone)]
pub struct CorsFairing;

#[rocket::async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        // Reflect whatever headers the preflight asked for.
        let allowed_headers = req
            .headers()
            .get_one("Access-Control-Request-Headers")
            .unwrap_or(DEFAULT_ALLOWED_HEADERS)
            .to_string();
        res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        res.set_header(Header::new("Access-Control-Allow-Methods", ALLOWED_METHODS));
        res.set_header(Header::new("Access-Control-Allow-Headers", allowed_headers));
    }
}
