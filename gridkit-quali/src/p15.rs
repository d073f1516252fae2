//! P15 lookup: the 15th-placed qualifier

use tracing::info;

use gridkit_common::{ClassificationRow, DataSource, Result, SessionKey};

use crate::classify::build_qualifying;

pub const P15_POSITION: usize = 15;

/// Row at P15, if the classification is long enough
pub fn p15_of(rows: &[ClassificationRow]) -> Option<ClassificationRow> {
    let row = rows.get(P15_POSITION - 1).cloned();
    if row.is_none() {
        info!(
            "Not enough drivers ({}) in qualifying results to determine P15",
            rows.len()
        );
    }
    row
}

/// Full qualifying build, projected to P15
pub async fn get_p15(source: &dyn DataSource, session_key: SessionKey) -> Result<Option<ClassificationRow>> {
    let rows = build_qualifying(source, session_key).await?;
    Ok(p15_of(&rows))
}
