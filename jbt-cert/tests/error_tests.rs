use jbt_cert::CertError;

#[test]
fn error_display_encoding_too_short() {
    let err = CertError::EncodingTooShort {
        em_len: 40,
        required: 62,
    };
    let msg = format!("{err}");
    assert!(msg.contains("too short"));
    assert!(msg.contains("40"));
    assert!(msg.contains("62"));
}

#[test]
fn error_display_keygen() {
    let err = CertError::Keygen("too small".into());
    assert!(format!("{err}").contains("key generation failed"));
}

#[test]
fn error_display_certificate_not_found() {
    let err = CertError::CertificateNotFound;
    assert!(format!("{err}").contains("no certificate block"));
}

#[test]
fn error_display_invalid_encoding() {
    let err = CertError::InvalidEncoding;
    assert!(format!("{err}").contains("UTF-8"));
}

#[test]
fn error_display_certificate_parse() {
    let err = CertError::CertificateParse("truncated".into());
    let msg = format!("{err}");
    assert!(msg.contains("certificate parse error"));
    assert!(msg.contains("truncated"));
}

#[test]
fn error_from_der() {
    let der_err = der::Error::from(der::ErrorKind::Length {
        tag: der::Tag::Sequence,
    });
    let err: CertError = der_err.into();
    assert!(format!("{err}").contains("DER"));
}

#[test]
fn error_is_debug() {
    let err = CertError::InvalidValidity("inverted".into());
    let _ = format!("{err:?}");
}
