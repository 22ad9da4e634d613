use vitals_core::{
    overall_status, vitals_ok, ConditionTag, OverallStatus, PatientProfile, Reading, Severity,
    VitalType, VitalsError, VitalsMonitor,
};

fn temp(value: f64, unit: &str) -> Reading {
    Reading::new(VitalType::Temperature, value, unit)
}

fn pulse(value: f64) -> Reading {
    Reading::new(VitalType::PulseRate, value, "bpm")
}

fn spo2(value: f64) -> Reading {
    Reading::new(VitalType::Spo2, value, "%")
}

fn tag(monitor: &VitalsMonitor, value: f64, unit: &str, vital: VitalType) -> ConditionTag {
    monitor
        .assess_reading(value, unit, vital)
        .expect("reading classifies")
}

// ---- single readings ----

#[test]
fn normal_fahrenheit_temperature_is_ok() {
    let monitor = VitalsMonitor::default();
    assert_eq!(tag(&monitor, 98.6, "F", VitalType::Temperature), ConditionTag::Normal);

    let status = monitor.assess_all(&[temp(98.6, "F")], "en").unwrap();
    assert_eq!(status.overall, OverallStatus::Ok);
    assert!(status.findings.is_empty());
}

#[test]
fn slightly_low_temperature_is_a_warning() {
    let monitor = VitalsMonitor::default();
    let status = monitor.assess_all(&[temp(96.0, "F")], "en").unwrap();
    assert_eq!(status.overall, OverallStatus::Warning);
    assert_eq!(status.findings.len(), 1);
    assert_eq!(status.findings[0].condition, ConditionTag::NearHypothermia);
    assert_eq!(status.findings[0].severity, Severity::Warning);
}

#[test]
fn celsius_is_converted_before_classification() {
    let monitor = VitalsMonitor::default();
    assert_eq!(tag(&monitor, 37.0, "C", VitalType::Temperature), ConditionTag::Normal);
    assert_eq!(tag(&monitor, 37.0, "°C", VitalType::Temperature), ConditionTag::Normal);
    assert_eq!(tag(&monitor, 310.15, "K", VitalType::Temperature), ConditionTag::Normal);
    assert_eq!(tag(&monitor, 40.0, "C", VitalType::Temperature), ConditionTag::Hyperthermia);
}

#[test]
fn very_low_pulse_is_critical() {
    let monitor = VitalsMonitor::default();
    let status = monitor.assess_all(&[pulse(40.0)], "en").unwrap();
    assert_eq!(status.overall, OverallStatus::Critical);
    assert_eq!(status.failures().len(), 1);
    assert_eq!(status.failures()[0].condition, ConditionTag::Bradycardia);
    assert!(status.warnings().is_empty());
}

// ---- reading-sets ----

#[test]
fn two_warnings_keep_input_order() {
    let monitor = VitalsMonitor::default();
    let status = monitor
        .assess_all(&[temp(96.0, "F"), pulse(99.0), spo2(95.0)], "en")
        .unwrap();
    assert_eq!(status.overall, OverallStatus::Warning);
    let conditions: Vec<ConditionTag> = status.findings.iter().map(|f| f.condition).collect();
    assert_eq!(
        conditions,
        vec![ConditionTag::NearHypothermia, ConditionTag::NearTachycardia]
    );
    assert_eq!(status.warnings().len(), 2);
}

#[test]
fn critical_takes_precedence_over_warning() {
    let monitor = VitalsMonitor::default();
    let status = monitor
        .assess_all(&[temp(96.0, "F"), spo2(85.0)], "en")
        .unwrap();
    assert_eq!(status.overall, OverallStatus::Critical);
    assert_eq!(status.findings.len(), 2);
    assert_eq!(status.failures().len(), 1);
    assert_eq!(status.warnings().len(), 1);
}

#[test]
fn empty_reading_set_is_ok() {
    let status = VitalsMonitor::default().assess_all(&[], "en").unwrap();
    assert_eq!(status.overall, OverallStatus::Ok);
    assert!(status.is_ok());
}

#[test]
fn overall_status_is_the_worst_severity() {
    assert_eq!(
        overall_status([ConditionTag::Normal, ConditionTag::Normal]),
        OverallStatus::Ok
    );
    assert_eq!(
        overall_status([ConditionTag::NearLowOxygen, ConditionTag::Normal]),
        OverallStatus::Warning
    );
    assert_eq!(
        overall_status([
            ConditionTag::NearLowOxygen,
            ConditionTag::Tachycardia,
            ConditionTag::NearHyperthermia
        ]),
        OverallStatus::Critical
    );
}

// ---- boundaries ----

#[test]
fn temperature_band_edges() {
    let monitor = VitalsMonitor::default();
    let cases = [
        (94.99, ConditionTag::Hypothermia),
        (95.0, ConditionTag::NearHypothermia),
        (96.53, ConditionTag::NearHypothermia),
        (96.54, ConditionTag::Normal),
        (100.46, ConditionTag::Normal),
        (100.47, ConditionTag::NearHyperthermia),
        (101.99, ConditionTag::NearHyperthermia),
        (102.0, ConditionTag::Hyperthermia),
    ];
    for (value, expected) in cases {
        assert_eq!(
            tag(&monitor, value, "F", VitalType::Temperature),
            expected,
            "temperature {value}"
        );
    }
}

#[test]
fn values_between_hundredths_are_still_classified() {
    let monitor = VitalsMonitor::default();
    assert_eq!(
        tag(&monitor, 94.995, "F", VitalType::Temperature),
        ConditionTag::Hypothermia
    );
    assert_eq!(
        tag(&monitor, 96.535, "F", VitalType::Temperature),
        ConditionTag::Normal
    );
    assert_eq!(
        tag(&monitor, 101.995, "F", VitalType::Temperature),
        ConditionTag::NearHyperthermia
    );
}

#[test]
fn pulse_and_spo2_band_edges() {
    let monitor = VitalsMonitor::default();
    let pulse_cases = [
        (59.99, ConditionTag::Bradycardia),
        (60.0, ConditionTag::NearBradycardia),
        (61.5, ConditionTag::NearBradycardia),
        (61.51, ConditionTag::Normal),
        (98.5, ConditionTag::NearTachycardia),
        (100.0, ConditionTag::Tachycardia),
    ];
    for (value, expected) in pulse_cases {
        assert_eq!(tag(&monitor, value, "bpm", VitalType::PulseRate), expected, "pulse {value}");
    }

    let spo2_cases = [
        (89.99, ConditionTag::LowOxygen),
        (90.0, ConditionTag::NearLowOxygen),
        (91.5, ConditionTag::NearLowOxygen),
        (95.0, ConditionTag::Normal),
        (98.5, ConditionTag::NearHighOxygen),
        (100.0, ConditionTag::HighOxygen),
    ];
    for (value, expected) in spo2_cases {
        assert_eq!(tag(&monitor, value, "%", VitalType::Spo2), expected, "spo2 {value}");
    }
}

// ---- errors ----

#[test]
fn unknown_unit_is_rejected() {
    let err = VitalsMonitor::default()
        .assess_reading(70.0, "mmHg", VitalType::PulseRate)
        .unwrap_err();
    assert!(matches!(err, VitalsError::UnsupportedUnit { .. }));
}

#[test]
fn non_finite_values_are_rejected() {
    let monitor = VitalsMonitor::default();
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = monitor
            .assess_reading(value, "F", VitalType::Temperature)
            .unwrap_err();
        assert!(matches!(err, VitalsError::InvalidValue { .. }));
    }
}

#[test]
fn unsupported_language_fails_before_assessment() {
    let err = VitalsMonitor::default()
        .assess_all(&[pulse(70.0)], "xx")
        .unwrap_err();
    assert!(matches!(err, VitalsError::UnsupportedLanguage(ref l) if l == "xx"));
}

#[test]
fn unknown_vital_name_is_rejected() {
    let err = "blood_pressure".parse::<VitalType>().unwrap_err();
    assert!(matches!(err, VitalsError::UnknownVitalType(_)));
}

// ---- languages ----

#[test]
fn findings_are_localized() {
    let monitor = VitalsMonitor::default();
    let en = monitor.assess_all(&[pulse(40.0)], "en").unwrap();
    let de = monitor.assess_all(&[pulse(40.0)], "de").unwrap();
    assert_eq!(en.findings[0].message, "Pulse Rate critical! Bradycardia detected");
    assert_eq!(de.findings[0].message, "Puls kritisch! Bradykardie erkannt");
}

#[test]
fn report_carries_summary_and_recommendation() {
    let report = VitalsMonitor::default()
        .report(&[temp(37.0, "C"), pulse(40.0)], "en")
        .unwrap();
    assert_eq!(report.overall, OverallStatus::Critical);
    assert_eq!(report.summary, "Critical vital signs detected");
    assert_eq!(
        report.recommendation.as_deref(),
        Some("Immediate medical attention required")
    );
    assert_eq!(report.vitals.len(), 2);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.config_digest.len(), 64);

    let ok = VitalsMonitor::default().report(&[pulse(72.0)], "de").unwrap();
    assert_eq!(ok.summary, "Alle Vitalwerte normal");
    assert!(ok.recommendation.is_none());
}

// ---- profiles and compatibility ----

#[test]
fn age_adjusts_pulse_limits() {
    let adult = VitalsMonitor::default();
    let senior = VitalsMonitor::for_profile(&PatientProfile::with_age(70)).unwrap();
    let child = VitalsMonitor::for_profile(&PatientProfile::with_age(8)).unwrap();

    assert_eq!(tag(&adult, 55.0, "bpm", VitalType::PulseRate), ConditionTag::Bradycardia);
    assert_eq!(tag(&senior, 55.0, "bpm", VitalType::PulseRate), ConditionTag::Normal);
    assert_eq!(tag(&child, 110.0, "bpm", VitalType::PulseRate), ConditionTag::Normal);
    assert_eq!(tag(&adult, 110.0, "bpm", VitalType::PulseRate), ConditionTag::Tachycardia);
}

#[test]
fn vitals_ok_reports_every_issue() {
    let (ok, issues) = vitals_ok(&[temp(98.6, "F"), pulse(72.0), spo2(97.0)]).unwrap();
    assert!(ok);
    assert!(issues.is_empty());

    let (ok, issues) = vitals_ok(&[temp(103.0, "F"), pulse(99.0)]).unwrap();
    assert!(!ok);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].condition, ConditionTag::Hyperthermia);
    assert_eq!(issues[1].condition, ConditionTag::NearTachycardia);
}
