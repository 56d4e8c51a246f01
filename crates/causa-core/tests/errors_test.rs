//! Error code mapping and display formatting.

use causa_core::errors::{
    CausaErrorCode, ConfigError, DataError, DiscoveryError, EstimationError, PipelineError,
    StatsError,
};

#[test]
fn subsystem_codes() {
    assert_eq!(DataError::Empty.error_code(), "DATA_ERROR");
    assert_eq!(
        DataError::UnknownColumn("z".into()).error_code(),
        "UNKNOWN_VARIABLE"
    );
    assert_eq!(
        StatsError::Singular { column: 1, pivot: 0.0 }.error_code(),
        "SINGULAR_MATRIX"
    );
    assert_eq!(
        DiscoveryError::CycleDetected {
            from: "a".into(),
            to: "b".into()
        }
        .error_code(),
        "CYCLE_DETECTED"
    );
    assert_eq!(
        EstimationError::NotADag { cycle: "a -> b -> a".into() }.error_code(),
        "CYCLE_DETECTED"
    );
}

#[test]
fn nested_errors_keep_inner_code() {
    let err: DiscoveryError = StatsError::NotEnoughObservations { n: 3, required: 5 }.into();
    assert_eq!(err.error_code(), "INSUFFICIENT_SAMPLES");

    let err: PipelineError = DiscoveryError::UnknownVariable("q".into()).into();
    assert_eq!(err.error_code(), "UNKNOWN_VARIABLE");

    let err: PipelineError = ConfigError::FileNotFound { path: "x".into() }.into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn coded_string_prefixes_code() {
    let err = DataError::Parse {
        line: 4,
        message: "bad".into(),
    };
    assert_eq!(err.coded_string(), "[DATA_ERROR] Parse error on line 4: bad");
}
