use std::net::IpAddr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;

use crate::validation::fields::{DataSourceValidation, FieldState, FieldValidation, is_filled};

static DOI_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b10\.(\d+\.*)+[ /]").ok());

static INTEGER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").ok());

/// Whether `value` contains a DOI prefix such as `10.1234/`.
pub fn is_doi(value: &str) -> bool {
    DOI_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value))
}

/// An absolute http, https or ftp URL whose host is an IP address or a
/// domain with an alphabetic top-level label.
pub fn is_data_source_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https" | "ftp") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    bare.parse::<IpAddr>().is_ok() || has_tld(host)
}

fn has_tld(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    match domain.rsplit_once('.') {
        Some((rest, tld)) => {
            !rest.is_empty()
                && (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
                    || tld.starts_with("xn--"))
        }
        None => false,
    }
}

fn is_int_within(value: &str, min: i64, max: i64) -> bool {
    if !INTEGER_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value)) {
        return false;
    }
    value
        .parse::<i64>()
        .is_ok_and(|n| (min..=max).contains(&n))
}

pub fn title_validator(title: &str) -> FieldValidation {
    FieldValidation::new("titleClasses", is_filled(title))
}

pub fn keywords_validator(keywords: &[String]) -> FieldValidation {
    FieldValidation::new("keywordClasses", !keywords.is_empty())
}

pub fn temporal_coverage_from_validator(from: Option<NaiveDate>) -> FieldValidation {
    FieldValidation::new("temporalCoverageFromClasses", from.is_some())
}

pub fn temporal_coverage_to_validator(to: Option<NaiveDate>) -> FieldValidation {
    FieldValidation::new("temporalCoverageToClasses", to.is_some())
}

pub fn north_coordinate_validator(coordinate: Option<&str>) -> FieldValidation {
    let valid = coordinate.is_some_and(|c| is_int_within(c, -90, 90));
    FieldValidation::new("northBoundingCoordinateClasses", valid)
}

pub fn south_coordinate_validator(coordinate: Option<&str>) -> FieldValidation {
    let valid = coordinate.is_some_and(|c| is_int_within(c, -90, 90));
    FieldValidation::new("southBoundingCoordinateClasses", valid)
}

pub fn east_coordinate_validator(coordinate: Option<&str>) -> FieldValidation {
    let valid = coordinate.is_some_and(|c| is_int_within(c, -180, 180));
    FieldValidation::new("eastBoundingCoordinateClasses", valid)
}

pub fn west_coordinate_validator(coordinate: Option<&str>) -> FieldValidation {
    let valid = coordinate.is_some_and(|c| is_int_within(c, -180, 180));
    FieldValidation::new("westBoundingCoordinateClasses", valid)
}

pub fn locations_validator(locations: &[String]) -> FieldValidation {
    FieldValidation::new("locationsClasses", !locations.is_empty())
}

pub fn taxa_validator(taxa: &str) -> FieldValidation {
    FieldValidation::new("taxaCoveredClasses", is_filled(taxa))
}

pub fn collection_methods_validator(methods: &[String]) -> FieldValidation {
    FieldValidation::new("collectionMethodsClasses", !methods.is_empty())
}

/// Validates the DOI and URL data source fields together.
///
/// One valid source with the other left empty is enough; a source that is
/// filled in must be valid.
pub fn data_source_validator(doi: &str, url: &str) -> DataSourceValidation {
    let doi_valid = is_doi(doi);
    let url_valid = is_data_source_url(url);

    let (valid, doi_state, url_state) = if doi_valid && url.is_empty() {
        (true, FieldState::Success, FieldState::Warning)
    } else if doi.is_empty() && url_valid {
        (true, FieldState::Warning, FieldState::Success)
    } else if doi_valid && url_valid {
        (true, FieldState::Success, FieldState::Success)
    } else {
        (false, FieldState::of(doi_valid), FieldState::of(url_valid))
    };

    DataSourceValidation {
        valid,
        doi: doi_state,
        url: url_state,
    }
}

pub fn custodian_validator(custodian: &str) -> FieldValidation {
    FieldValidation::new("custodianClasses", is_filled(custodian))
}

pub fn contact_organisation_validator(contact: &str) -> FieldValidation {
    FieldValidation::new("contactOrganisationClasses", is_filled(contact))
}

pub fn contact_position_validator(contact: &str) -> FieldValidation {
    FieldValidation::new("contactPositionClasses", is_filled(contact))
}

pub fn stored_format_validator(format: &str) -> FieldValidation {
    FieldValidation::new("storedFormatClasses", !format.is_empty())
}

pub fn available_formats_validator(formats: &[String]) -> FieldValidation {
    FieldValidation::new("availableFormatsClasses", !formats.is_empty())
}

pub fn access_rights_validator(rights: &str) -> FieldValidation {
    FieldValidation::new("accessRightsClasses", !rights.is_empty())
}

pub fn use_restrictions_validator(restrictions: &str) -> FieldValidation {
    FieldValidation::new("useRestrictionsClasses", is_filled(restrictions))
}

pub fn security_classification_validator(classification: &str) -> FieldValidation {
    FieldValidation::new("securityClassificationClasses", !classification.is_empty())
}

pub fn generalisations_validator(generalisations: &str) -> FieldValidation {
    FieldValidation::new("generalisationsClasses", is_filled(generalisations))
}
