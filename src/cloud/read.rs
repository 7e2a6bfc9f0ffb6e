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

use tf_provider::Diagnostics;
use tracing::{debug, warn};

use crate::client::CloudLookup;

use super::identity::Identity;
use super::mapper::{map_lookup, CloudRecord};
use super::state::CloudState;

/// Look the cloud up and convert it, reporting every failure into `diags`
///
/// The record is returned even when some of its values could not be
/// converted; callers must check `diags` before trusting it.
pub async fn resolve<C: CloudLookup>(
    diags: &mut Diagnostics,
    client: &C,
    identity: &Identity,
) -> Option<CloudRecord> {
    let lookup = match identity.lookup() {
        Ok(lookup) => lookup,
        Err(err) => {
            err.report(diags);
            return None;
        }
    };

    debug!(?lookup, "reading cloud");
    match map_lookup(lookup.run(client).await) {
        Ok((record, errors)) => {
            for err in &errors {
                err.report(diags);
            }
            Some(record)
        }
        Err(err) => {
            warn!(?lookup, %err, "cloud lookup failed");
            err.report(diags);
            None
        }
    }
}

impl<'a> CloudState<'a> {
    pub async fn read<C: CloudLookup>(&mut self, diags: &mut Diagnostics, client: &C) -> Option<()> {
        let identity = Identity::from(&*self);
        let record = resolve(diags, client, &identity).await?;

        if !diags.errors.is_empty() {
            debug!(?record, "cloud read with errors, state left untouched");
            return None;
        }

        self.set_record(record);
        Some(())
    }
}
