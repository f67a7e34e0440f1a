//! Ordered check-then-mutate pipelines.
//!
//! Every operation on a resource is a fixed list of checks followed by one
//! mutator. Checks read the request, stage what later steps need and may look
//! at the store; the first failing check ends the run. The mutator runs only
//! once every check has passed, so a failed check never leaves a partial
//! write behind.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

use crate::error::ApiError;
use crate::store::{Keyed, Store};

const MAX_ID_ATTEMPTS: usize = 8;

/// The operations a resource can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// What a pipeline run can touch besides its staged fields.
pub struct Env<'a, R> {
    pub store: &'a mut Store<R>,
    pub next_id: &'a dyn Fn() -> String,
}

impl<'a, R> Env<'a, R> {
    pub fn new(store: &'a mut Store<R>, next_id: &'a dyn Fn() -> String) -> Self {
        Self { store, next_id }
    }
}

impl<R: Keyed + Clone> Env<'_, R> {
    /// Draws ids from the generator until one is not already in the store.
    pub fn fresh_id(&self) -> Result<String, ApiError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.next_id)();
            if self.store.get(&id).is_none() {
                return Ok(id);
            }
        }
        Err(ApiError::Internal(
            "Id generator kept returning ids already in use".to_string(),
        ))
    }
}

pub type Check<S, R> = fn(&mut S, &Env<'_, R>) -> Result<(), ApiError>;
pub type Mutator<S, R> = fn(S, &mut Env<'_, R>) -> Result<Reply<R>, ApiError>;

/// Successful outcome of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<R> {
    Created(R),
    Found(R),
    Updated(R),
    Listed(Vec<R>),
    Deleted,
}

impl<R> Reply<R> {
    pub fn status(&self) -> u16 {
        match self {
            Reply::Created(_) => 201,
            Reply::Found(_) | Reply::Updated(_) | Reply::Listed(_) => 200,
            Reply::Deleted => 204,
        }
    }

    /// The single record carried by the reply, if any.
    pub fn into_record(self) -> Option<R> {
        match self {
            Reply::Created(record) | Reply::Found(record) | Reply::Updated(record) => Some(record),
            Reply::Listed(_) | Reply::Deleted => None,
        }
    }
}

impl<R: Serialize> Reply<R> {
    /// Response body as `{ "data": ... }`; `Deleted` has no body.
    pub fn into_body(self) -> serde_json::Result<Option<Value>> {
        let data = match self {
            Reply::Created(record) | Reply::Found(record) | Reply::Updated(record) => {
                serde_json::to_value(record)?
            }
            Reply::Listed(records) => serde_json::to_value(records)?,
            Reply::Deleted => return Ok(None),
        };
        Ok(Some(json!({ "data": data })))
    }
}

/// A named chain of checks ending in a mutator.
pub struct Pipeline<S: 'static, R: 'static> {
    pub name: &'static str,
    pub checks: &'static [(&'static str, Check<S, R>)],
    pub mutator: Mutator<S, R>,
}

impl<S: 'static, R: 'static> Pipeline<S, R> {
    pub fn run(&self, mut stage: S, env: &mut Env<'_, R>) -> Result<Reply<R>, ApiError> {
        for (step, check) in self.checks {
            if let Err(err) = check(&mut stage, env) {
                debug!(pipeline = self.name, step = %step, status = err.status(), error = %err, "Pipeline short-circuited");
                return Err(err);
            }
        }
        (self.mutator)(stage, env)
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|(step, _)| *step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Note {
        id: String,
    }

    impl Keyed for Note {
        fn key(&self) -> &str {
            &self.id
        }
    }

    #[derive(Default)]
    struct Trail {
        visited: Vec<&'static str>,
    }

    fn first(stage: &mut Trail, _env: &Env<'_, Note>) -> Result<(), ApiError> {
        stage.visited.push("first");
        Ok(())
    }

    fn refuse(stage: &mut Trail, _env: &Env<'_, Note>) -> Result<(), ApiError> {
        stage.visited.push("refuse");
        Err(ApiError::validation("nope"))
    }

    fn unreachable_check(_stage: &mut Trail, _env: &Env<'_, Note>) -> Result<(), ApiError> {
        panic!("checks after a failure must not run");
    }

    fn append(stage: Trail, env: &mut Env<'_, Note>) -> Result<Reply<Note>, ApiError> {
        let note = Note {
            id: format!("{}:{}", (env.next_id)(), stage.visited.join(",")),
        };
        env.store
            .insert(note.clone())
            .map_err(|_| ApiError::Internal("duplicate note".into()))?;
        Ok(Reply::Created(note))
    }

    static PASSING: Pipeline<Trail, Note> = Pipeline {
        name: "passing",
        checks: &[("first", first)],
        mutator: append,
    };

    static FAILING: Pipeline<Trail, Note> = Pipeline {
        name: "failing",
        checks: &[("first", first), ("refuse", refuse), ("unreachable", unreachable_check)],
        mutator: append,
    };

    #[test]
    fn test_runs_checks_then_mutator() {
        let mut store = Store::new();
        let next_id = || "n1".to_string();
        let mut env = Env::new(&mut store, &next_id);

        let reply = PASSING.run(Trail::default(), &mut env).unwrap();
        assert_eq!(reply.status(), 201);
        assert_eq!(reply.into_record().unwrap().id, "n1:first");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_short_circuits_without_mutating() {
        let mut store = Store::new();
        let next_id = || "n1".to_string();
        let mut env = Env::new(&mut store, &next_id);

        let err = FAILING.run(Trail::default(), &mut env).unwrap_err();
        assert_eq!(err, ApiError::validation("nope"));
        assert!(store.is_empty());
        assert_eq!(FAILING.step_names(), vec!["first", "refuse", "unreachable"]);
    }

    #[test]
    fn test_fresh_id_skips_taken_ids() {
        let mut store = Store::seeded(vec![Note { id: "n1".into() }]);
        let counter = std::cell::Cell::new(0);
        let next_id = || {
            counter.set(counter.get() + 1);
            format!("n{}", counter.get())
        };
        let env = Env::new(&mut store, &next_id);
        assert_eq!(env.fresh_id(), Ok("n2".to_string()));

        let stuck = || "n1".to_string();
        let env = Env::new(&mut store, &stuck);
        assert!(matches!(env.fresh_id(), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_reply_bodies() {
        let created = Reply::Created(Note { id: "a".into() });
        assert_eq!(created.into_body().unwrap(), Some(json!({ "data": { "id": "a" } })));

        let listed: Reply<Note> = Reply::Listed(vec![]);
        assert_eq!(listed.status(), 200);
        assert_eq!(listed.into_body().unwrap(), Some(json!({ "data": [] })));

        let deleted: Reply<Note> = Reply::Deleted;
        assert_eq!(deleted.status(), 204);
        assert_eq!(deleted.into_body().unwrap(), None);
    }
}
