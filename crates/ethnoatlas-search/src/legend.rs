//! Continuous-variable legends: equal-width bins and the environmental
//! min/max scan.
//!
//! Both scans reproduce the data service they replace literally, quirks
//! included: the binner seeds its running max at zero and walks an if/elif
//! chain that can skip a max update, and the environmental scan seeds both
//! endpoints at zero regardless of data sign.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{
    CodeId, ContinuousLegend, EnvironmentalVariableId, MissingDataEntry, RangeBin, ValueRange,
    VariableId,
};
use regex::Regex;
use tracing::warn;

use crate::error::SearchError;

/// Any ASCII letter marks a coded value as missing data.
static LETTERS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new("[a-zA-Z]").expect("literal pattern")
});

/// Build the legend for one continuous variable: an optional missing-data
/// entry plus five equal-width bins over the observed numeric range.
///
/// A variable with no numeric values yields no bins (the missing-data entry
/// may still be present). An unknown variable id is an error, since the
/// variable is the operation's sole subject.
pub async fn bin<S>(store: &S, variable: VariableId) -> Result<ContinuousLegend, SearchError>
where
    S: AtlasStore + ?Sized,
{
    if store.variable(variable).await?.is_none() {
        return Err(SearchError::VariableNotFound { id: variable });
    }
    let descriptions: BTreeMap<CodeId, String> = store
        .codes_for_variable(variable)
        .await?
        .into_iter()
        .map(|code| (code.id, code.description))
        .collect();

    let mut missing: Option<MissingDataEntry> = None;
    let mut min_value: Option<f64> = None;
    let mut max_value = 0.0f64;
    for value in store.coded_values_for_variable(variable).await? {
        if LETTERS.is_match(&value.coded_value) {
            if missing.is_none() {
                missing = Some(MissingDataEntry {
                    description: value
                        .code
                        .and_then(|id| descriptions.get(&id).cloned())
                        .unwrap_or_default(),
                    code: value.coded_value,
                    variable,
                });
            }
            continue;
        }
        let text = value.coded_value.replace(',', "");
        let Ok(v) = text.parse::<f64>() else {
            warn!(%variable, value = %text, "unparseable coded value skipped");
            continue;
        };
        // Literal scan: min starts unset, max seeded at zero, and the
        // chain updates at most one endpoint per value.
        if let Some(current) = min_value {
            if v < current {
                min_value = Some(v);
            } else if v > max_value {
                max_value = v;
            }
        } else {
            min_value = Some(v);
        }
    }

    let mut bins = Vec::new();
    if let Some(min_value) = min_value {
        let width = (max_value - min_value) / 5.0;
        let mut lower = min_value;
        for code in 0..5u8 {
            let upper = lower + width;
            bins.push(RangeBin {
                code,
                description: format!("{lower} - {upper}"),
                min: lower,
                max: upper,
                variable,
            });
            lower = upper;
        }
    }
    Ok(ContinuousLegend { missing, bins })
}

/// Observed value range of one environmental variable.
///
/// Both endpoints are seeded at zero and the scan updates at most one per
/// value, so an unknown id or an empty variable reports `{0.0, 0.0}` and
/// all-positive data keeps the minimum at zero.
pub async fn min_max<S>(
    store: &S,
    variable: EnvironmentalVariableId,
) -> Result<ValueRange, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let mut range = ValueRange { min: 0.0, max: 0.0 };
    for value in store.environmental_values_for_variable(variable).await? {
        if value.value < range.min {
            range.min = value.value;
        } else if value.value > range.max {
            range.max = value.value;
        }
    }
    Ok(range)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ethnoatlas_store::{MemoryAtlas, sample_atlas};
    use ethnoatlas_types::{
        CodeDescription, CodedValue, CodedValueId, DataType, GeoPoint, Society, SocietyId,
        VariableDescription,
    };

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    /// A one-society atlas holding one continuous variable with the given
    /// raw coded values, plus an "abc" -> "Unknown" code record.
    fn atlas_with_values(values: &[&str]) -> (MemoryAtlas, VariableId) {
        let mut atlas = MemoryAtlas::new();
        let society = SocietyId::new();
        atlas
            .insert_society(Society {
                id: society,
                ext_id: "Aa1".to_owned(),
                xd_id: "xd1".to_owned(),
                name: "Test society".to_owned(),
                alternate_names: String::new(),
                focal_year: "1900".to_owned(),
                language: None,
                source: None,
                location: GeoPoint::new(0.0, 0.0),
            })
            .unwrap();
        let variable = VariableId::new();
        atlas
            .insert_variable(VariableDescription {
                id: variable,
                label: "B004".to_owned(),
                name: "Population density".to_owned(),
                data_type: DataType::Continuous,
                source: None,
            })
            .unwrap();
        let unknown = CodeId::new();
        atlas
            .insert_code(CodeDescription {
                id: unknown,
                variable,
                code: "abc".to_owned(),
                description: "Unknown".to_owned(),
            })
            .unwrap();
        for raw in values {
            let code = LETTERS.is_match(raw).then_some(unknown);
            atlas
                .insert_coded_value(CodedValue {
                    id: CodedValueId::new(),
                    variable,
                    society,
                    code,
                    coded_value: (*raw).to_owned(),
                })
                .unwrap();
        }
        (atlas, variable)
    }

    #[tokio::test]
    async fn five_equal_width_bins_plus_one_missing_entry() {
        let (atlas, variable) = atlas_with_values(&["1", "5.5", "10", "abc"]);

        let legend = bin(&atlas, variable).await.unwrap();
        let missing = legend.missing.unwrap();
        assert_eq!(missing.code, "abc");
        assert_eq!(missing.description, "Unknown");

        assert_eq!(legend.bins.len(), 5);
        for (index, range_bin) in legend.bins.iter().enumerate() {
            assert_eq!(usize::from(range_bin.code), index);
            assert_close(range_bin.max - range_bin.min, 1.8);
        }
        assert_close(legend.bins.first().unwrap().min, 1.0);
        assert_close(legend.bins.last().unwrap().max, 10.0);
    }

    #[tokio::test]
    async fn bins_are_contiguous() {
        let (atlas, variable) = atlas_with_values(&["0", "20"]);

        let legend = bin(&atlas, variable).await.unwrap();
        for pair in legend.bins.windows(2) {
            let (prev, next) = (pair.first().unwrap(), pair.last().unwrap());
            assert_close(prev.max, next.min);
        }
    }

    #[tokio::test]
    async fn missing_entry_is_emitted_at_most_once() {
        let (atlas, variable) = atlas_with_values(&["NA", "3", "NA", "7"]);

        let legend = bin(&atlas, variable).await.unwrap();
        let missing = legend.missing.unwrap();
        assert_eq!(missing.code, "NA");
        assert_eq!(legend.bins.len(), 5);
    }

    #[tokio::test]
    async fn thousands_separators_are_stripped() {
        let (atlas, variable) = atlas_with_values(&["1,500", "500"]);

        let legend = bin(&atlas, variable).await.unwrap();
        assert!(legend.missing.is_none());
        assert_close(legend.bins.first().unwrap().min, 500.0);
    }

    #[tokio::test]
    async fn max_update_can_be_shadowed_by_a_min_update() {
        // 10 seeds min; 2 lowers it; 5 only then raises the zero-seeded
        // max. The true maximum 10 is never recorded.
        let (atlas, variable) = atlas_with_values(&["10", "2", "5"]);

        let legend = bin(&atlas, variable).await.unwrap();
        assert_close(legend.bins.first().unwrap().min, 2.0);
        assert_close(legend.bins.last().unwrap().max, 5.0);
    }

    #[tokio::test]
    async fn no_numeric_values_yields_no_bins() {
        let (atlas, variable) = atlas_with_values(&["NA"]);

        let legend = bin(&atlas, variable).await.unwrap();
        assert!(legend.missing.is_some());
        assert!(legend.bins.is_empty());
    }

    #[tokio::test]
    async fn unknown_variable_is_an_error() {
        let (atlas, _) = atlas_with_values(&["1"]);

        let err = bin(&atlas, VariableId::new()).await.unwrap_err();
        assert!(matches!(err, SearchError::VariableNotFound { .. }));
    }

    #[tokio::test]
    async fn min_max_keeps_the_zero_seed_on_positive_data() {
        let (atlas, ids) = sample_atlas().unwrap();

        let range = min_max(&atlas, ids.temperature).await.unwrap();
        assert_close(range.min, 0.0);
        assert_close(range.max, 27.3);
    }

    #[tokio::test]
    async fn min_max_of_unknown_variable_is_zero_zero() {
        let (atlas, _) = sample_atlas().unwrap();

        let range = min_max(&atlas, EnvironmentalVariableId::new())
            .await
            .unwrap();
        assert_close(range.min, 0.0);
        assert_close(range.max, 0.0);
    }
}
