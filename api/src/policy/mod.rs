//! Declarative resource-access policies for protected handlers.
//!
//! A handler declares, once, which ids in its arguments must pass which
//! ownership checks. At request time [`Policy::authorize`] walks the
//! declared pairs in order and ANDs them together; admin claims bypass the
//! whole list. Extractors are plain `fn` pointers over the handler's typed
//! argument struct, so a policy that names a nonexistent field simply does
//! not compile.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

use crate::auth::claims::Claims;
use db::models::exam_result;

/// The ownership checks a policy can require.
///
/// Adding a new kind of check means adding a variant and its arm in
/// [`Checker::allows`]; nothing else has to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checker {
    /// Allowed iff the caller *is* the referenced user.
    CallerIs,
    /// Allowed iff the referenced exam result exists and belongs to the
    /// caller. A missing result denies; the handler decides whether that
    /// surfaces as 403 or 404.
    ExamResultOwner,
}

impl Checker {
    async fn allows(
        &self,
        db: &DatabaseConnection,
        caller_id: i64,
        resource_id: i64,
    ) -> Result<bool, DbErr> {
        match self {
            Checker::CallerIs => Ok(caller_id == resource_id),
            Checker::ExamResultOwner => {
                let result = exam_result::Entity::find_by_id(resource_id).one(db).await?;
                Ok(result.map(|r| r.user_id == caller_id).unwrap_or(false))
            }
        }
    }
}

/// Why an authorization attempt did not succeed.
///
/// Database faults are kept apart from denials so handlers can answer 500
/// instead of a misleading 403.
#[derive(Debug)]
pub enum PolicyError {
    Denied,
    Db(DbErr),
}

/// An ordered list of `(Checker, extractor)` requirements over a handler's
/// argument type `A`.
///
/// Requirements are ANDed. An extractor returning `None` means the request
/// does not constrain that id, and the pair is skipped.
pub struct Policy<A> {
    requirements: Vec<(Checker, fn(&A) -> Option<i64>)>,
}

impl<A> Policy<A> {
    pub fn new() -> Self {
        Self {
            requirements: Vec::new(),
        }
    }

    pub fn require(mut self, checker: Checker, extract: fn(&A) -> Option<i64>) -> Self {
        self.requirements.push((checker, extract));
        self
    }

    /// Evaluates the policy for `claims` against `args`.
    ///
    /// Admin claims bypass every requirement. Otherwise each pair runs in
    /// declaration order and the first failing check aborts with
    /// [`PolicyError::Denied`].
    pub async fn authorize(
        &self,
        db: &DatabaseConnection,
        claims: &Claims,
        args: &A,
    ) -> Result<(), PolicyError> {
        if claims.admin {
            return Ok(());
        }

        for (checker, extract) in &self.requirements {
            let Some(resource_id) = extract(args) else {
                continue;
            };

            match checker.allows(db, claims.sub, resource_id).await {
                Ok(true) => {}
                Ok(false) => return Err(PolicyError::Denied),
                Err(e) => return Err(PolicyError::Db(e)),
            }
        }

        Ok(())
    }
}

impl<A> Default for Policy<A> {
    fn default() -> Self {
        Self::new()
    }
}
