//! Animal manager: validation gate in front of the repository.
//!
//! # Responsibility
//! - Own every business rule for the animal catalog.
//! - Translate invalid input and absence into typed `ManagerError`s.
//! - Run repository work on tokio's blocking pool.
//!
//! # Invariants
//! - Argument checks run before any store access.
//! - Each operation performs exactly one repository call.
//! - Store faults are surfaced unmodified as `ManagerError::Store`.

use crate::model::animal::{is_blank, Animal, AnimalValidationError};
use crate::repo::animal_repo::{AnimalRepository, RepoError, RepoResult};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const INVALID_ANIMAL_MESSAGE: &str = "Invalid animal!";
pub const EMPTY_CATALOG_NUMBER_MESSAGE: &str = "Catalog number cannot be empty.";
pub const EMPTY_TYPE_MESSAGE: &str = "Animal type cannot be empty.";
pub const NO_ANIMALS_MESSAGE: &str = "No animal found.";
pub const NO_ANIMALS_OF_TYPE_MESSAGE: &str = "No animal found with the given type.";

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Outcome of a rejected or failed manager operation.
#[derive(Debug)]
pub enum ManagerError {
    /// Animal is missing or structurally invalid.
    InvalidAnimal(Option<AnimalValidationError>),
    /// A required key argument is missing or blank.
    InvalidArgument(&'static str),
    /// A well-formed request matched nothing.
    NotFound(String),
    /// Persistence-layer failure.
    Store(RepoError),
    /// The blocking worker was cancelled before finishing.
    Interrupted,
}

impl ManagerError {
    /// Stable, metadata-only code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAnimal(_) => "invalid_animal",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store_failed",
            Self::Interrupted => "interrupted",
        }
    }

    fn not_found_by_catalog_number(catalog_number: &str) -> Self {
        Self::NotFound(format!(
            "No animal found with catalog number: {catalog_number}"
        ))
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAnimal(_) => f.write_str(INVALID_ANIMAL_MESSAGE),
            Self::InvalidArgument(message) => f.write_str(message),
            Self::NotFound(message) => f.write_str(message),
            Self::Store(err) => write!(f, "{err}"),
            Self::Interrupted => f.write_str("store worker was cancelled"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAnimal(Some(err)) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ManagerError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Validating facade over an [`AnimalRepository`].
///
/// Inputs accept `impl Into<Option<..>>`: pass `&Animal` / `&str` directly,
/// or `None` for a missing argument.
pub struct AnimalManager<R> {
    repo: R,
}

impl<R> AnimalManager<R>
where
    R: AnimalRepository + Clone + Send + 'static,
{
    /// Creates a manager over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the wrapped repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and persists a new animal.
    ///
    /// # Errors
    /// - `InvalidAnimal` when `animal` is missing or fails validation.
    pub async fn add<'a>(&self, animal: impl Into<Option<&'a Animal>>) -> ManagerResult<()> {
        let animal = require_valid_animal("animal_add", animal.into())?.clone();
        let catalog_number = animal.catalog_number.clone();

        self.run("animal_add", move |repo| repo.add_animal(&animal)).await?;
        info!("event=animal_add module=manager status=ok catalog_number={catalog_number}");
        Ok(())
    }

    /// Deletes every animal with the catalog number.
    ///
    /// Deleting an absent catalog number is a no-op.
    pub async fn delete<'a>(
        &self,
        catalog_number: impl Into<Option<&'a str>>,
    ) -> ManagerResult<()> {
        let catalog_number =
            require_argument("animal_delete", catalog_number.into(), EMPTY_CATALOG_NUMBER_MESSAGE)?
                .to_string();
        let key = catalog_number.clone();

        let removed = self
            .run("animal_delete", move |repo| repo.delete_animal(&key))
            .await?;
        info!(
            "event=animal_delete module=manager status=ok catalog_number={catalog_number} removed={removed}"
        );
        Ok(())
    }

    /// Returns every stored animal.
    ///
    /// # Errors
    /// - `NotFound` when the store is empty.
    pub async fn get_all(&self) -> ManagerResult<Vec<Animal>> {
        let animals = self.run("animal_list", |repo| repo.list_animals()).await?;
        if animals.is_empty() {
            return Err(rejected(
                "animal_list",
                ManagerError::NotFound(NO_ANIMALS_MESSAGE.to_string()),
            ));
        }

        debug!(
            "event=animal_list module=manager status=ok count={}",
            animals.len()
        );
        Ok(animals)
    }

    /// Returns the animals whose type equals `kind` exactly.
    ///
    /// # Errors
    /// - `InvalidArgument` when `kind` is missing or blank; checked first.
    /// - `NotFound` when nothing matches.
    pub async fn search_by_type<'a>(
        &self,
        kind: impl Into<Option<&'a str>>,
    ) -> ManagerResult<Vec<Animal>> {
        let kind = require_argument("animal_search", kind.into(), EMPTY_TYPE_MESSAGE)?.to_string();

        let animals = self
            .run("animal_search", move |repo| repo.search_by_type(&kind))
            .await?;
        if animals.is_empty() {
            return Err(rejected(
                "animal_search",
                ManagerError::NotFound(NO_ANIMALS_OF_TYPE_MESSAGE.to_string()),
            ));
        }

        debug!(
            "event=animal_search module=manager status=ok count={}",
            animals.len()
        );
        Ok(animals)
    }

    /// Returns the animal registered under `catalog_number`.
    ///
    /// # Errors
    /// - `InvalidArgument` when the key is missing or blank.
    /// - `NotFound` when no animal has the key; the message embeds it verbatim.
    pub async fn get_specific<'a>(
        &self,
        catalog_number: impl Into<Option<&'a str>>,
    ) -> ManagerResult<Animal> {
        let catalog_number =
            require_argument("animal_get", catalog_number.into(), EMPTY_CATALOG_NUMBER_MESSAGE)?
                .to_string();
        let key = catalog_number.clone();

        match self
            .run("animal_get", move |repo| repo.get_animal(&key))
            .await?
        {
            Some(animal) => {
                debug!("event=animal_get module=manager status=ok catalog_number={catalog_number}");
                Ok(animal)
            }
            None => Err(rejected(
                "animal_get",
                ManagerError::not_found_by_catalog_number(&catalog_number),
            )),
        }
    }

    /// Validates and persists changes to an existing animal.
    ///
    /// Rows are matched by `Animal::id`, so the catalog number may change.
    ///
    /// # Errors
    /// - `InvalidAnimal` when `animal` is missing or fails validation.
    /// - `NotFound` when no stored animal has the same id.
    pub async fn update<'a>(&self, animal: impl Into<Option<&'a Animal>>) -> ManagerResult<()> {
        let animal = require_valid_animal("animal_update", animal.into())?.clone();
        let catalog_number = animal.catalog_number.clone();

        let updated = self
            .run("animal_update", move |repo| match repo.update_animal(&animal) {
                Ok(()) => Ok(true),
                Err(RepoError::NotFound(_)) => Ok(false),
                Err(err) => Err(err),
            })
            .await?;
        if !updated {
            return Err(rejected(
                "animal_update",
                ManagerError::not_found_by_catalog_number(&catalog_number),
            ));
        }

        info!("event=animal_update module=manager status=ok catalog_number={catalog_number}");
        Ok(())
    }

    async fn run<T, F>(&self, event: &'static str, op: F) -> ManagerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&R) -> RepoResult<T> + Send + 'static,
    {
        let repo = self.repo.clone();
        let joined = tokio::task::spawn_blocking(move || op(&repo)).await;

        let result = match joined {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => return Err(failed(event, ManagerError::Interrupted)),
        };
        result.map_err(|err| failed(event, ManagerError::Store(err)))
    }
}

fn require_valid_animal<'a>(
    event: &'static str,
    animal: Option<&'a Animal>,
) -> ManagerResult<&'a Animal> {
    let Some(animal) = animal else {
        return Err(rejected(event, ManagerError::InvalidAnimal(None)));
    };
    animal
        .validate()
        .map_err(|err| rejected(event, ManagerError::InvalidAnimal(Some(err))))?;
    Ok(animal)
}

fn require_argument<'a>(
    event: &'static str,
    value: Option<&'a str>,
    message: &'static str,
) -> ManagerResult<&'a str> {
    match value {
        Some(value) if !is_blank(value) => Ok(value),
        _ => Err(rejected(event, ManagerError::InvalidArgument(message))),
    }
}

fn rejected(event: &'static str, err: ManagerError) -> ManagerError {
    warn!(
        "event={} module=manager status=rejected error_code={}",
        event,
        err.code()
    );
    err
}

fn failed(event: &'static str, err: ManagerError) -> ManagerError {
    error!(
        "event={} module=manager status=error error_code={} error={}",
        event,
        err.code(),
        err
    );
    err
}
