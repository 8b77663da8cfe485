//! Animals manager: validated CRUD over an [`AnimalRepository`].
//!
//! # Responsibility
//! - Run the full record rule set before every insert or update.
//! - Reject blank keys before touching the store.
//! - Turn empty read results into `NotFound` errors.
//!
//! # Invariants
//! - A rejected call never reaches a mutating repository method.
//! - Caller-visible messages are fixed strings; validation failures never
//!   reveal which field failed.
//! - The manager keeps no state besides its repository.

use crate::model::animal::AnimalRecord;
use crate::repo::animal_repo::{AnimalQuery, AnimalRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const INVALID_ANIMAL_MESSAGE: &str = "Invalid animal!";
pub const EMPTY_CATALOG_NUMBER_MESSAGE: &str = "Catalog number cannot be empty.";
pub const NO_ANIMALS_MESSAGE: &str = "No animal found.";
pub const NO_ANIMALS_OF_TYPE_MESSAGE: &str = "No animal found with the given type.";

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Caller-facing error for manager operations.
#[derive(Debug)]
pub enum ManagerError {
    /// Malformed call-site input, detected before any store access.
    InvalidArgument(&'static str),
    /// The record failed the rule set. Displays as `Invalid animal!`.
    Validation,
    /// A read matched nothing. Carries the operation-specific message.
    NotFound(String),
    /// Store failure, passed through unchanged.
    Repo(RepoError),
}

impl ManagerError {
    fn missing_catalog_number(catalog_number: &str) -> Self {
        Self::NotFound(format!(
            "No animal found with catalog number: {catalog_number}"
        ))
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => f.write_str(message),
            Self::Validation => f.write_str(INVALID_ANIMAL_MESSAGE),
            Self::NotFound(message) => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ManagerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Business-rule layer over an animal repository.
pub struct AnimalsManager<R: AnimalRepository> {
    repo: R,
}

impl<R: AnimalRepository> AnimalsManager<R> {
    /// Creates a manager using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new record.
    ///
    /// Store rejections (for example a duplicate catalog number) come back
    /// as `ManagerError::Repo` untouched.
    pub fn add_animal(&self, animal: &AnimalRecord) -> ManagerResult<()> {
        ensure_valid("add", animal)?;
        self.repo.insert(animal)?;
        info!("event=animal_add module=service status=ok");
        Ok(())
    }

    /// Deletes by catalog number. Unknown keys are a silent no-op.
    ///
    /// Accepts `&str` or `Option<&str>`; `None`, empty and whitespace-only
    /// keys are rejected.
    pub fn delete_animal<'a>(
        &self,
        catalog_number: impl Into<Option<&'a str>>,
    ) -> ManagerResult<()> {
        let catalog_number = match catalog_number.into() {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                warn!("event=animal_delete module=service status=rejected reason=empty_key");
                return Err(ManagerError::InvalidArgument(EMPTY_CATALOG_NUMBER_MESSAGE));
            }
        };

        let removed = self.repo.delete(catalog_number)?;
        info!("event=animal_delete module=service status=ok removed={removed}");
        Ok(())
    }

    /// Returns every record in insertion order; fails when the catalog is
    /// empty.
    pub fn get_all_animals(&self) -> ManagerResult<Vec<AnimalRecord>> {
        let animals = self.repo.get_all()?;
        if animals.is_empty() {
            return Err(ManagerError::NotFound(NO_ANIMALS_MESSAGE.to_string()));
        }
        Ok(animals)
    }

    /// Returns the record with `catalog_number`.
    pub fn get_animal(&self, catalog_number: &str) -> ManagerResult<AnimalRecord> {
        self.repo
            .get_by_key(catalog_number)?
            .ok_or_else(|| ManagerError::missing_catalog_number(catalog_number))
    }

    /// Returns records whose type equals `animal_type` exactly, in insertion
    /// order.
    pub fn search_by_type(&self, animal_type: &str) -> ManagerResult<Vec<AnimalRecord>> {
        let animals = self.repo.find(&AnimalQuery::by_type(animal_type))?;
        if animals.is_empty() {
            return Err(ManagerError::NotFound(
                NO_ANIMALS_OF_TYPE_MESSAGE.to_string(),
            ));
        }
        Ok(animals)
    }

    /// Re-validates and overwrites the stored record with the same catalog
    /// number.
    pub fn update_animal(&self, animal: &AnimalRecord) -> ManagerResult<()> {
        ensure_valid("update", animal)?;
        match self.repo.update(animal) {
            Ok(()) => {
                info!("event=animal_update module=service status=ok");
                Ok(())
            }
            Err(RepoError::NotFound(catalog_number)) => {
                Err(ManagerError::missing_catalog_number(&catalog_number))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn ensure_valid(operation: &str, animal: &AnimalRecord) -> ManagerResult<()> {
    animal.validate().map_err(|violation| {
        warn!(
            "event=animal_{operation} module=service status=rejected field={}",
            violation.field()
        );
        ManagerError::Validation
    })
}

#[cfg(test)]
mod tests {
    use super::{AnimalsManager, ManagerError};
    use crate::model::animal::AnimalRecord;
    use crate::repo::animal_repo::{AnimalQuery, AnimalRepository, RepoError, RepoResult};
    use std::cell::RefCell;

    /// Records which repository methods were reached.
    #[derive(Default)]
    struct RecordingRepo {
        calls: RefCell<Vec<&'static str>>,
        fail_inserts: bool,
    }

    impl AnimalRepository for RecordingRepo {
        fn get_all(&self) -> RepoResult<Vec<AnimalRecord>> {
            self.calls.borrow_mut().push("get_all");
            Ok(Vec::new())
        }

        fn get_by_key(&self, _catalog_number: &str) -> RepoResult<Option<AnimalRecord>> {
            self.calls.borrow_mut().push("get_by_key");
            Ok(None)
        }

        fn find(&self, _query: &AnimalQuery) -> RepoResult<Vec<AnimalRecord>> {
            self.calls.borrow_mut().push("find");
            Ok(Vec::new())
        }

        fn insert(&self, animal: &AnimalRecord) -> RepoResult<()> {
            self.calls.borrow_mut().push("insert");
            if self.fail_inserts {
                return Err(RepoError::InvalidData(animal.catalog_number.clone()));
            }
            Ok(())
        }

        fn update(&self, _animal: &AnimalRecord) -> RepoResult<()> {
            self.calls.borrow_mut().push("update");
            Ok(())
        }

        fn delete(&self, _catalog_number: &str) -> RepoResult<bool> {
            self.calls.borrow_mut().push("delete");
            Ok(false)
        }
    }

    fn valid_animal() -> AnimalRecord {
        AnimalRecord {
            catalog_number: "00HNTWXTQSH4".to_string(),
            name: "Puppi".to_string(),
            breed: "Cape fox".to_string(),
            animal_type: "Mammal".to_string(),
            age: 3,
            gender: "Male".to_string(),
            is_healthy: true,
        }
    }

    #[test]
    fn rejected_records_never_reach_the_repository() {
        let manager = AnimalsManager::new(RecordingRepo::default());
        let mut animal = valid_animal();
        animal.gender = "Unknown".to_string();

        assert!(matches!(
            manager.add_animal(&animal),
            Err(ManagerError::Validation)
        ));
        assert!(matches!(
            manager.update_animal(&animal),
            Err(ManagerError::Validation)
        ));
        assert!(matches!(
            manager.delete_animal("   "),
            Err(ManagerError::InvalidArgument(_))
        ));
        assert!(manager.repo.calls.borrow().is_empty());
    }

    #[test]
    fn repository_failures_pass_through_unchanged() {
        let manager = AnimalsManager::new(RecordingRepo {
            fail_inserts: true,
            ..RecordingRepo::default()
        });

        let err = manager.add_animal(&valid_animal()).unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Repo(RepoError::InvalidData(ref key)) if key == "00HNTWXTQSH4"
        ));
        assert_eq!(*manager.repo.calls.borrow(), vec!["insert"]);
    }

    #[test]
    fn validation_error_displays_fixed_message() {
        assert_eq!(ManagerError::Validation.to_string(), "Invalid animal!");
    }
}
