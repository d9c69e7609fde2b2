// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Declarative description of output types.
//!
//! Every object type of the schema is listed as a manifest of
//! `{ name, type, resolver }` entries that are turned into the
//! executable schema once at startup.

use std::fmt;

use async_graphql::dynamic::{Field, FieldFuture, InputValue, Object, ResolverContext, TypeRef};

type Resolver = Box<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

pub struct FieldManifest {
    name: &'static str,
    type_ref: TypeRef,
    description: Option<&'static str>,
    arguments: Vec<InputValue>,
    resolve: Resolver,
}

impl FieldManifest {
    pub fn new<F>(name: &'static str, type_ref: TypeRef, resolve: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        Self {
            name,
            type_ref,
            description: None,
            arguments: Vec::new(),
            resolve: Box::new(resolve),
        }
    }

    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn argument(mut self, argument: InputValue) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn into_field(self) -> Field {
        let Self {
            name,
            type_ref,
            description,
            arguments,
            resolve,
        } = self;
        let mut field = Field::new(name, type_ref, resolve);
        if let Some(description) = description {
            field = field.description(description);
        }
        arguments
            .into_iter()
            .fold(field, |field, argument| field.argument(argument))
    }
}

impl fmt::Debug for FieldManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldManifest")
            .field("name", &self.name)
            .field("type_ref", &self.type_ref.to_string())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ObjectManifest {
    name: &'static str,
    description: &'static str,
    fields: Vec<FieldManifest>,
}

impl ObjectManifest {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, fields: Vec<FieldManifest>) -> Self {
        Self {
            name,
            description,
            fields,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldManifest::name)
    }

    #[must_use]
    pub fn into_object(self) -> Object {
        let Self {
            name,
            description,
            fields,
        } = self;
        fields
            .into_iter()
            .fold(Object::new(name).description(description), |object, field| {
                object.field(field.into_field())
            })
    }
}
