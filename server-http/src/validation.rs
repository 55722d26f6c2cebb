use crate::api::{AddressRequest, TestRateRequest};
use taxrate::domain::{Country, JurisdictionKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    CountryNotSet,
    UnsupportedCountry(String),
    ZipNotProvided,
    ProvinceNotSet,
    NothingToTest,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::CountryNotSet => write!(f, "Country is not set"),
            ValidationError::UnsupportedCountry(_) => {
                write!(f, "Tax can be calculated only for USA zip or Canada province")
            }
            ValidationError::ZipNotProvided => write!(f, "Zip is not provided"),
            ValidationError::ProvinceNotSet => write!(f, "Province is not set"),
            ValidationError::NothingToTest => {
                write!(f, "Specify a zip code or a two letter province code to test")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for shared::Error {
    fn from(err: ValidationError) -> Self {
        shared::Error::Validation(err.to_string())
    }
}

/// Turns caller input into a normalized [`JurisdictionKey`].
/// Everything is rejected here so the rate cache only ever sees valid keys.
pub struct JurisdictionFactory;

impl JurisdictionFactory {
    /// Checks run in the same order a checkout address is inspected:
    /// country first, then the code that country needs
    pub fn from_address(req: &AddressRequest) -> Result<JurisdictionKey, ValidationError> {
        let iso_code = req
            .country
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or(ValidationError::CountryNotSet)?;

        let country = Country::try_from(iso_code)
            .map_err(|_| ValidationError::UnsupportedCountry(iso_code.to_string()))?;

        match country {
            Country::Usa => Self::usa(req.zip.as_deref()),
            Country::Canada => Self::canada(req.province.as_deref()),
        }
    }

    /// A zip wins over a province when both are filled in
    pub fn from_test_request(req: &TestRateRequest) -> Result<JurisdictionKey, ValidationError> {
        if has_text(req.zip.as_deref()) {
            Self::usa(req.zip.as_deref())
        } else if has_text(req.province.as_deref()) {
            Self::canada(req.province.as_deref())
        } else {
            Err(ValidationError::NothingToTest)
        }
    }

    fn usa(zip: Option<&str>) -> Result<JurisdictionKey, ValidationError> {
        JurisdictionKey::usa(zip.unwrap_or_default()).map_err(|_| ValidationError::ZipNotProvided)
    }

    fn canada(province: Option<&str>) -> Result<JurisdictionKey, ValidationError> {
        JurisdictionKey::canada(province.unwrap_or_default())
            .map_err(|_| ValidationError::ProvinceNotSet)
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
