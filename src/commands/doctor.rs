// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::LedgerStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &LedgerStore) -> Result<()> {
    let issues = store.integrity_issues()?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(count = issues.len(), "integrity issues found");
        let rows = issues.into_iter().map(|i| vec![i.kind, i.detail]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
