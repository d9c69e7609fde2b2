// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::{
    Name, Value,
    dynamic::{
        Enum, FieldFuture, FieldValue, InputValue, ResolverContext, SchemaBuilder, TypeRef, Union,
    },
};
use strum::IntoEnumIterator as _;

use genreguide_core::{
    color::{ColorRepresentation, GenreColors, unlisted_background},
    genre::Subgenre,
    subgenre::{Operator, SubgenreGroup, SubgenreGroupItem, SubgenreToken},
};
use genreguide_repo::prelude::*;
use genreguide_usecases::{Error, subgenre as uc, track::TrackQueryResolver};

use crate::{
    error::{internal_error, into_graphql_error},
    manifest::{FieldManifest, ObjectManifest},
};

pub(crate) const SUBGENRE_TYPE: &str = "Subgenre";
pub(crate) const SUBGENRE_GROUP_TYPE: &str = "SubgenreGroup";
pub(crate) const SUBGENRE_GROUP_ITEM_TYPE: &str = "SubgenreGroupItem";
pub(crate) const SUBGENRE_TOKEN_TYPE: &str = "SubgenreToken";
pub(crate) const OPERATOR_TYPE: &str = "Operator";
pub(crate) const COLOR_TYPE: &str = "Color";
pub(crate) const COLOR_REPRESENTATION_ENUM: &str = "ColorRepresentation";

/// A subgenre that is referenced by name and loaded on demand.
///
/// Values of union types must be tagged with their concrete type,
/// see [`token_value()`].
#[derive(Debug, Clone)]
pub(crate) struct SubgenreNode {
    name: String,
    subgenre: Option<Subgenre>,
}

impl SubgenreNode {
    pub(crate) const fn named(name: String) -> Self {
        Self {
            name,
            subgenre: None,
        }
    }

    pub(crate) fn loaded(subgenre: Subgenre) -> Self {
        Self {
            name: subgenre.name.clone(),
            subgenre: Some(subgenre),
        }
    }
}

pub(crate) fn subgenre_value<'a>(node: SubgenreNode) -> FieldValue<'a> {
    FieldValue::owned_any(node)
}

pub(crate) fn subgenre_list_value<'a, I>(names: I) -> FieldValue<'a>
where
    I: IntoIterator<Item = String>,
{
    FieldValue::list(names.into_iter().map(SubgenreNode::named).map(subgenre_value))
}

pub(crate) fn token_value<'a>(token: SubgenreToken) -> FieldValue<'a> {
    match token {
        SubgenreToken::Operator(operator) => {
            FieldValue::owned_any(operator).with_type(OPERATOR_TYPE)
        }
        SubgenreToken::Subgenre(name) => {
            subgenre_value(SubgenreNode::named(name)).with_type(SUBGENRE_TYPE)
        }
    }
}

fn group_item_value<'a>(item: SubgenreGroupItem) -> FieldValue<'a> {
    match item {
        SubgenreGroupItem::Token(token) => token_value(token),
        SubgenreGroupItem::Group(group) => {
            FieldValue::owned_any(group).with_type(SUBGENRE_GROUP_TYPE)
        }
    }
}

/// The subgenre of the parent node, or `None` if it is unknown.
async fn load_parent<S>(ctx: &ResolverContext<'_>) -> async_graphql::Result<Option<Subgenre>>
where
    S: DocumentStore + 'static,
{
    let node = ctx.parent_value.try_downcast_ref::<SubgenreNode>()?;
    if let Some(subgenre) = &node.subgenre {
        return Ok(Some(subgenre.clone()));
    }
    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
    match uc::load_subgenre(resolver.store().as_ref(), &node.name).await {
        Ok(subgenre) => Ok(Some(subgenre)),
        Err(Error::NotFound(msg)) => {
            log::debug!("{msg}");
            Ok(None)
        }
        Err(err) => Err(into_graphql_error(err)),
    }
}

/// Colors of a genre, bound to the name of the genre.
///
/// Subgenres that are not listed on the sheet have no genre and
/// fall back to [`GenreColors::unlisted()`].
#[derive(Debug, Clone)]
struct ColorNode {
    genre: Option<String>,
    colors: GenreColors,
}

fn representation_arg(ctx: &ResolverContext<'_>) -> async_graphql::Result<ColorRepresentation> {
    let Some(value) = ctx.args.get("representation").filter(|value| !value.is_null()) else {
        return Ok(Default::default());
    };
    Ok(value.enum_name()?.parse()?)
}

fn representation_argument() -> InputValue {
    let default: &'static str = ColorRepresentation::default().into();
    InputValue::new(
        "representation",
        TypeRef::named_nn(COLOR_REPRESENTATION_ENUM),
    )
    .default_value(Value::Enum(Name::new(default)))
}

fn subgenre_group_manifest() -> ObjectManifest {
    ObjectManifest::new(
        SUBGENRE_GROUP_TYPE,
        "A group of subgenres and operators that may contain nested groups.",
        vec![FieldManifest::new(
            "items",
            TypeRef::named_nn_list_nn(SUBGENRE_GROUP_ITEM_TYPE),
            |ctx| {
                FieldFuture::new(async move {
                    let group = ctx.parent_value.try_downcast_ref::<SubgenreGroup>()?;
                    let items = group.items().iter().cloned().map(group_item_value);
                    Ok(Some(FieldValue::list(items)))
                })
            },
        )],
    )
}

fn operator_manifest() -> ObjectManifest {
    ObjectManifest::new(
        OPERATOR_TYPE,
        "Combines the subgenres on both sides.",
        vec![
            FieldManifest::new("symbol", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let operator = ctx.parent_value.try_downcast_ref::<Operator>()?;
                    Ok(Some(Value::from(operator.symbol())))
                })
            })
            .description("The symbol as it appears on the sheet, e.g. `|`"),
            FieldManifest::new("name", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let operator = ctx.parent_value.try_downcast_ref::<Operator>()?;
                    Ok(Some(Value::from(operator.name())))
                })
            })
            .description("One of `OR`, `INTO`, `WITH`, `AND`"),
        ],
    )
}

fn subgenre_manifest<S>() -> ObjectManifest
where
    S: DocumentStore + 'static,
{
    ObjectManifest::new(
        SUBGENRE_TYPE,
        "A subgenre of the genre sheet. Fields other than the name are null or empty for \
         subgenres that are not listed on the sheet.",
        vec![
            FieldManifest::new("name", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let node = ctx.parent_value.try_downcast_ref::<SubgenreNode>()?;
                    Ok(Some(Value::from(node.name.clone())))
                })
            }),
            FieldManifest::new("isGenre", TypeRef::named(TypeRef::BOOLEAN), |ctx| {
                FieldFuture::new(async move {
                    let subgenre = load_parent::<S>(&ctx).await?;
                    Ok(subgenre.map(|subgenre| Value::from(subgenre.is_genre)))
                })
            })
            .description("Whether this subgenre is one of the main categories"),
            FieldManifest::new("genre", TypeRef::named(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let subgenre = load_parent::<S>(&ctx).await?;
                    Ok(subgenre.map(|subgenre| subgenre_value(SubgenreNode::named(subgenre.genre))))
                })
            })
            .description("The category that this subgenre belongs to"),
            FieldManifest::new("color", TypeRef::named(COLOR_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let Some(subgenre) = load_parent::<S>(&ctx).await? else {
                        return Ok(Some(FieldValue::owned_any(ColorNode {
                            genre: None,
                            colors: GenreColors::unlisted(),
                        })));
                    };
                    let resolver = ctx.data::<TrackQueryResolver<S>>()?;
                    let colors = uc::load_colors(resolver.store().as_ref(), &subgenre)
                        .await
                        .map_err(into_graphql_error)?;
                    Ok(colors.map(|colors| {
                        FieldValue::owned_any(ColorNode {
                            genre: Some(subgenre.genre),
                            colors,
                        })
                    }))
                })
            })
            .description(
                "The color of the category. Black and white for subgenres that are not listed \
                 on the sheet.",
            ),
            FieldManifest::new("origins", TypeRef::named_nn_list_nn(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let origins = load_parent::<S>(&ctx)
                        .await?
                        .map(|subgenre| subgenre.origins)
                        .unwrap_or_default();
                    Ok(Some(subgenre_list_value(origins)))
                })
            })
            .description("Subgenres that this subgenre directly originates from"),
            FieldManifest::new("subgenres", TypeRef::named_nn_list_nn(SUBGENRE_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let subgenres = load_parent::<S>(&ctx)
                        .await?
                        .map(|subgenre| subgenre.subgenres)
                        .unwrap_or_default();
                    Ok(Some(subgenre_list_value(subgenres)))
                })
            })
            .description("Subgenres that directly originate from this subgenre"),
        ],
    )
}

fn color_manifest() -> ObjectManifest {
    ObjectManifest::new(
        COLOR_TYPE,
        "The colors of a genre.",
        vec![
            FieldManifest::new("fromGenre", TypeRef::named(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let node = ctx.parent_value.try_downcast_ref::<ColorNode>()?;
                    Ok(node.genre.clone().map(Value::from))
                })
            })
            .description("The name of the genre that this color comes from"),
            FieldManifest::new("foreground", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let node = ctx.parent_value.try_downcast_ref::<ColorNode>()?;
                    let representation = representation_arg(&ctx)?;
                    let foreground = node
                        .colors
                        .foreground(representation)
                        .map_err(|err| internal_error(err.to_string()))?;
                    Ok(Some(Value::from(foreground)))
                })
            })
            .description("The text color")
            .argument(representation_argument()),
            FieldManifest::new("background", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let node = ctx.parent_value.try_downcast_ref::<ColorNode>()?;
                    let representation = representation_arg(&ctx)?;
                    let background = match &node.genre {
                        Some(genre) => node.colors.background(genre, representation),
                        None => unlisted_background(representation).to_owned(),
                    };
                    Ok(Some(Value::from(background)))
                })
            })
            .description("The background color")
            .argument(representation_argument()),
        ],
    )
}

fn color_representation_enum() -> Enum {
    ColorRepresentation::iter().fold(
        Enum::new(COLOR_REPRESENTATION_ENUM).description("Format of a color"),
        |colors, representation| colors.item(<&'static str>::from(representation)),
    )
}

pub(crate) fn register_types<S>(builder: SchemaBuilder) -> SchemaBuilder
where
    S: DocumentStore + 'static,
{
    builder
        .register(subgenre_manifest::<S>().into_object())
        .register(subgenre_group_manifest().into_object())
        .register(operator_manifest().into_object())
        .register(color_manifest().into_object())
        .register(color_representation_enum())
        .register(
            Union::new(SUBGENRE_GROUP_ITEM_TYPE)
                .description("Either a nested group or a single subgenre or operator")
                .possible_type(SUBGENRE_GROUP_TYPE)
                .possible_type(SUBGENRE_TYPE)
                .possible_type(OPERATOR_TYPE),
        )
        .register(
            Union::new(SUBGENRE_TOKEN_TYPE)
                .description("Either a subgenre or an operator")
                .possible_type(SUBGENRE_TYPE)
                .possible_type(OPERATOR_TYPE),
        )
}
