//! Named type definitions.
//!
//! A [`Registry`] turns a table of `name -> notation` definitions into
//! descriptors. Definitions may refer to each other, and to themselves,
//! in any order:
//!
//! ```
//! use typeshape::registry::Registry;
//! use serde_json::json;
//!
//! let registry = Registry::from_definitions([
//!     ("tree", "{value: number, children: Array<tree>}"),
//!     ("forest", "Array<tree>"),
//! ]).unwrap();
//! let forest = registry.get("forest").unwrap();
//! assert!(forest.is_member(&json!([{"value": 1, "children": []}])));
//! ```
//!
//! Each name is built once, on first use. A name reached again while it is
//! still being built becomes a [`Deferred`] reference, bound when its
//! definition is complete. Cycles must pass through an array, map, tuple or
//! shape so that following them consumes data; `a = "a | string"` is
//! rejected.
//!
//! Types taken from a registry stay usable after the registry is dropped.
//! Recursive definitions form reference cycles and are never freed.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::descriptor::Type;
use crate::error::{Result, TypeshapeError};
use crate::notation::{self, Resolve};
use crate::reference::Deferred;
use crate::settings::Settings;

#[derive(Debug, Default, Clone)]
pub struct Registry {
    types: BTreeMap<String, Type>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions<I, K, V>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table: BTreeMap<String, String> = BTreeMap::new();
        for (name, text) in definitions {
            let name = name.into();
            if table.insert(name.clone(), text.into()).is_some() {
                return Err(TypeshapeError::Duplicate(name));
            }
        }
        let mut builder = Builder {
            definitions: &table,
            built: BTreeMap::new(),
            chain: Vec::new(),
            pending: HashMap::new(),
        };
        for name in table.keys() {
            builder.resolve(name, false)?;
        }
        info!(count = builder.built.len(), "type registry built");
        Ok(Self { types: builder.built })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_definitions(settings.types.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().map(|(k, t)| (k.as_str(), t))
    }
    pub fn len(&self) -> usize {
        self.types.len()
    }
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Parses notation with every registered name in scope.
    pub fn parse(&self, text: &str) -> Result<Type> {
        notation::parse_with(text, &mut Lookup(&self.types))
    }
}

struct Lookup<'r>(&'r BTreeMap<String, Type>);

impl Resolve for Lookup<'_> {
    fn resolve(&mut self, name: &str, _guarded: bool) -> Result<Type> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| TypeshapeError::UnknownType(name.to_string()))
    }
}

// ------------- Builder -------------

struct Builder<'d> {
    definitions: &'d BTreeMap<String, String>,
    built: BTreeMap<String, Type>,
    // names being built, outermost first, each with the number of guards
    // crossed on the way to it
    chain: Vec<(String, usize)>,
    pending: HashMap<String, Deferred>,
}

impl Builder<'_> {
    fn guards(&self) -> usize {
        self.chain.last().map_or(0, |(_, guards)| *guards)
    }

    fn build(&mut self, name: &str, guarded: bool) -> Result<Type> {
        let definitions = self.definitions;
        let text = definitions
            .get(name)
            .ok_or_else(|| TypeshapeError::UnknownType(name.to_string()))?;
        let guards = self.guards() + usize::from(guarded);
        self.chain.push((name.to_string(), guards));
        let parsed = notation::parse_with(text, self);
        self.chain.pop();
        let t = parsed?;
        let t = match self.pending.remove(name) {
            Some(deferred) => deferred.bind(t),
            None => t,
        };
        debug!(name, descriptor = %t, "built type");
        self.built.insert(name.to_string(), t.clone());
        Ok(t)
    }
}

impl Resolve for Builder<'_> {
    fn resolve(&mut self, name: &str, guarded: bool) -> Result<Type> {
        if let Some(t) = self.built.get(name) {
            return Ok(t.clone());
        }
        let entered = self.chain.iter().find(|(n, _)| n == name).map(|(_, g)| *g);
        match entered {
            Some(entered) => {
                if self.guards() + usize::from(guarded) <= entered {
                    return Err(TypeshapeError::Notation {
                        message: format!("type {name} refers to itself outside of any container"),
                        line: None,
                        col: None,
                    });
                }
                let deferred = self
                    .pending
                    .entry(name.to_string())
                    .or_insert_with(|| Deferred::new(name));
                Ok(deferred.reference())
            }
            None => self.build(name, guarded),
        }
    }
}
