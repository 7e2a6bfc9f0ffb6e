// This file is part of the terraform-provider-morpheus project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueNumber, ValueString};
use tf_provider::{map, Block, Description, Schema};

use crate::utils::WithSchema;

use super::identity::Identity;
use super::mapper::CloudRecord;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudState<'a> {
    pub id: ValueNumber,
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub code: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub location: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub external_id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub inventory_level: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub guidance_mode: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub time_zone: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub costing_mode: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub labels: Value<BTreeSet<ValueString<'a>>>,
    pub group_ids: Value<BTreeSet<ValueNumber>>,
}

fn computed(attr_type: AttributeType, description: &str) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint: AttributeConstraint::Computed,
        sensitive: false,
        deprecated: false,
    }
}

impl<'a> WithSchema for CloudState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                description: Description::plain("Provides a Morpheus cloud data source."),
                attributes: map! {
                    "id" => Attribute {
                        attr_type: AttributeType::Number,
                        description: Description::plain("The id of the Morpheus cloud"),
                        constraint: AttributeConstraint::OptionalComputed,
                        sensitive: false,
                        deprecated: false,
                    },
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("The name of the Morpheus cloud"),
                        constraint: AttributeConstraint::OptionalComputed,
                        sensitive: false,
                        deprecated: false,
                    },
                    "code" => computed(AttributeType::String, "Optional code for use with policies"),
                    "location" => computed(AttributeType::String, "Optional location for your cloud"),
                    "external_id" => computed(AttributeType::String, "The external id of the cloud"),
                    "inventory_level" => computed(AttributeType::String, "The inventory level of the cloud"),
                    "guidance_mode" => computed(AttributeType::String, "The guidance mode of the cloud"),
                    "time_zone" => computed(AttributeType::String, "The time zone of the cloud"),
                    "costing_mode" => computed(AttributeType::String, "The costing mode of the cloud"),
                    "labels" => computed(
                        AttributeType::Set(Box::new(AttributeType::String)),
                        "The organization labels associated with the cloud",
                    ),
                    "group_ids" => computed(
                        AttributeType::Set(Box::new(AttributeType::Number)),
                        "The ids of the groups granted access to the cloud",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> From<&CloudState<'a>> for Identity {
    fn from(state: &CloudState<'a>) -> Self {
        Self {
            id: state.id.as_ref_option().copied(),
            name: state.name.as_deref_option().map(str::to_owned),
        }
    }
}

fn string<'a>(s: String) -> ValueString<'a> {
    Value::Value(Cow::Owned(s))
}

impl<'a> CloudState<'a> {
    /// Overwrite every attribute with the content of `record`
    pub fn set_record(&mut self, record: CloudRecord) {
        self.id = Value::Value(record.id);
        self.name = string(record.name);
        self.code = string(record.code);
        self.location = string(record.location);
        self.external_id = string(record.external_id);
        self.inventory_level = string(record.inventory_level);
        self.guidance_mode = string(record.guidance_mode);
        self.time_zone = string(record.time_zone);
        self.costing_mode = string(record.costing_mode);
        self.labels = Value::Value(record.labels.into_iter().map(string).collect());
        self.group_ids = Value::Value(
            record
                .group_ids
                .into_iter()
                .map(|id| Value::Value(i64::from(id)))
                .collect(),
        );
    }
}
