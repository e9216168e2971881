use jbt_cert::CertError;
use jbt_license::LicenseError;

#[test]
fn error_display_malformed_token() {
    let err = LicenseError::MalformedToken("found 3 fields".into());
    let msg = format!("{err}");
    assert!(msg.contains("malformed license token"));
    assert!(msg.contains("found 3 fields"));
}

#[test]
fn error_display_signature_verification() {
    let err = LicenseError::SignatureVerificationFailed;
    assert!(format!("{err}").contains("signature verification failed"));
}

#[test]
fn error_display_unknown_product() {
    let err = LicenseError::UnknownProduct("XX".into());
    assert!(format!("{err}").contains("XX"));
}

#[test]
fn error_display_no_products() {
    let err = LicenseError::NoProductsRequested;
    assert!(format!("{err}").contains("no products"));
}

#[test]
fn error_from_cert_is_transparent() {
    let err: LicenseError = CertError::CertificateNotFound.into();
    assert_eq!(format!("{err}"), format!("{}", CertError::CertificateNotFound));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let license_err: LicenseError = serde_err.unwrap_err().into();
    assert!(format!("{license_err}").contains("serialization"));
}

#[test]
fn error_from_toml() {
    let toml_err: Result<toml::Value, _> = toml::from_str("= broken");
    let license_err: LicenseError = toml_err.unwrap_err().into();
    assert!(format!("{license_err}").contains("TOML"));
}

#[test]
fn error_is_debug() {
    let err = LicenseError::SignatureVerificationFailed;
    let _ = format!("{err:?}");
}
