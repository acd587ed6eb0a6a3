use mongodb::options::CountOptions;
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::{DbResultExt, Error, Result},
    model::{
        api::{InsertResult, UserRegistration},
        db::{NewUser, User},
        mongodb::{Coll, Raw},
    },
};

use super::{created, Created, Documents};

pub fn routes() -> Vec<Route> {
    routes![create_user, get_users]
}

#[post("/users", data = "<registration>")]
async fn create_user(
    registration: Json<UserRegistration>,
    users: Coll<NewUser>,
) -> Result<Created<InsertResult>> {
    const DB_ERROR: &str = "Error creating user";

    let user = NewUser::try_from(registration.0).map_err(|e| Error::BadRequest(e.to_string()))?;

    // Check email uniqueness. Not atomic with the insert below.
    let options = CountOptions::builder().limit(1_u64).build();
    let existing = users
        .count_documents(user.same_email(), options)
        .await
        .or_db_error(DB_ERROR)?;
    if existing > 0 {
        return Err(Error::Conflict("User exists".to_string()));
    }

    let result = users.insert_one(&user, None).await.or_db_error(DB_ERROR)?;
    Ok(created(result.into()))
}

#[get("/users")]
async fn get_users(users: Coll<Raw<User>>) -> Result<Documents> {
    const DB_ERROR: &str = "Error fetching users";

    let users = users
        .find(None, None)
        .await
        .or_db_error(DB_ERROR)?
        .try_collect::<Vec<_>>()
        .await
        .or_db_error(DB_ERROR)?;
    Ok(Json(users.into_iter().map(Raw::into_api_json).collect()))
}
