use log::{error, info};
use mongodb::{
    bson::doc,
    error::Error as DbError,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use rocket::{
    fairing::{Fairing, Info, Kind},
    figment::{
        providers::{Env, Format, Serialized, Toml},
        Figment, Profile,
    },
    Build, Rocket,
};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Port to listen on when neither `PORT` nor `ROCKET_PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

const DEFAULT_DB_HOST: &str = "cluster0.c1krwnm.mongodb.net";
const DEFAULT_DB_NAME: &str = "ucepComputerTrade";

/// Unprefixed environment variables that are read alongside `ROCKET_*`.
const PLAIN_ENV_KEYS: &[&str] = &["PORT"];

/// The configuration sources for the server, lowest priority first:
/// built-in defaults, `Rocket.toml`, `ROCKET_*` variables, then the plain
/// variables in [`PLAIN_ENV_KEYS`]. The plain `DB_*` variables are layered on
/// top by [`DbConfig::load`].
pub fn figment() -> Figment {
    Figment::from(rocket::Config::default())
        .merge(Serialized::default("port", DEFAULT_PORT))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .merge(Env::raw().only(PLAIN_ENV_KEYS).global())
        .select(Profile::from_env_or(
            "ROCKET_PROFILE",
            rocket::Config::DEFAULT_PROFILE,
        ))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Database credentials missing: set `DB_USER` and `DB_PASS`, or `DB_URI`")]
    MissingCredentials,
}

/// Configuration for the database.
///
/// Every field also accepts a number or boolean, since figment parses
/// `ROCKET_DB_PASS=1234` as an integer.
#[derive(Debug, Deserialize)]
pub struct DbConfig {
    // secrets
    #[serde(default, deserialize_with = "lossy_string")]
    db_uri: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    db_user: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    db_pass: Option<String>,
    // non-secrets
    #[serde(default, deserialize_with = "lossy_string")]
    db_host: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    db_name: Option<String>,
}

/// Read a scalar as text.
fn lossy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Bool(bool),
    }

    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl DbConfig {
    /// Load the config from `figment`, then apply the plain `DB_*` variables.
    ///
    /// The plain variables are taken verbatim: going through figment's value
    /// parser would turn `DB_PASS=0012` into the number 12.
    pub fn load(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        let mut config: Self = figment.extract()?;
        for (key, field) in [
            ("DB_URI", &mut config.db_uri),
            ("DB_USER", &mut config.db_user),
            ("DB_PASS", &mut config.db_pass),
            ("DB_HOST", &mut config.db_host),
            ("DB_NAME", &mut config.db_name),
        ] {
            if let Some(value) = Env::var(key) {
                *field = Some(value);
            }
        }
        Ok(config)
    }

    /// The connection string. An explicit `DB_URI` wins over the credentials.
    pub fn connection_uri(&self) -> Result<String, ConfigError> {
        if let Some(uri) = &self.db_uri {
            return Ok(uri.clone());
        }
        match (&self.db_user, &self.db_pass) {
            (Some(user), Some(pass)) => Ok(format!(
                "mongodb+srv://{user}:{pass}@{}/?retryWrites=true&w=majority",
                self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST)
            )),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Name of the database holding all the collections.
    pub fn db_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }
}

/// Create a client for the given connection string, pinned to the stable API.
pub async fn connect(uri: &str) -> Result<Client, DbError> {
    let mut options = ClientOptions::parse(uri).await?;
    let server_api = ServerApi::builder()
        .version(ServerApiVersion::V1)
        .strict(true)
        .deprecation_errors(true)
        .build();
    options.server_api = Some(server_api);
    Client::with_options(options)
}

/// Check the deployment is actually reachable.
pub async fn ping(client: &Client) -> Result<(), DbError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await?;
    Ok(())
}

/// A fairing that loads the MongoDB config, connects to the database,
/// checks the connection, and places both a `Client` and a `Database`
/// into managed state.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "MongoDB",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match DbConfig::load(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        let uri = match config.connection_uri() {
            Ok(uri) => uri,
            Err(e) => {
                error!("{e}");
                return Err(rocket);
            }
        };
        info!("Loaded database config, connecting...");

        // Construct the connection.
        let client = match connect(&uri).await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to database: {e}");
                return Err(rocket);
            }
        };
        if let Err(e) = ping(&client).await {
            error!("Failed to ping database: {e}");
            return Err(rocket);
        }
        let db = client.database(config.db_name());
        info!("...database connection online!");

        // Manage the state.
        rocket = rocket.manage(client).manage(db);
        Ok(rocket)
    }
}
