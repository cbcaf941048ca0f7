//! End-to-end flows through the FFI object.

use std::sync::Arc;

use diagnovet_core::ffi::{
    FfiBookingForm, FfiClinicForm, FfiImageUpload, FfiProfileForm, FfiReportForm, FfiSignupForm,
};
use diagnovet_core::{open_session, open_session_in_memory, open_with_config, ClinicCore, ClinicError, Config};

fn clinic_form() -> FfiClinicForm {
    FfiClinicForm {
        clinic_name: "Clínica Veterinaria San Martín".to_string(),
        address: "Calle Mayor 123, Madrid".to_string(),
        phone_number: "+34 912 345 678".to_string(),
    }
}

fn profile_form() -> FfiProfileForm {
    FfiProfileForm {
        phone_number: "+34 666 123 456".to_string(),
        professional_title: "surgeon".to_string(),
        full_name: "Dra. Laura Gómez".to_string(),
        professional_license: String::new(),
    }
}

fn report_form(core: &ClinicCore, animal: &str) -> FfiReportForm {
    FfiReportForm {
        animal_name: animal.to_string(),
        age: "5".to_string(),
        species: "dog".to_string(),
        breed: "Golden Retriever".to_string(),
        weight: "25.5".to_string(),
        gender: "female".to_string(),
        is_castrated: true,
        referral_doctor_name: "Dr. John Smith".to_string(),
        referral_doctor_email: "doctor@clinic.com".to_string(),
        tutor_name: "Maria Garcia".to_string(),
        tutor_phone: "+1 555 123-4567".to_string(),
        study_type: "radiography".to_string(),
        consultation_reason: "Limping".to_string(),
        study_reason: "Suspected fracture".to_string(),
        ..core.new_report_form()
    }
}

fn onboard_veterinarian(core: &ClinicCore) -> anyhow::Result<()> {
    core.login("vet@clinic.com".to_string(), "veterinarian".to_string(), "es".to_string())?;
    core.verify_mfa("488 519".to_string())?;
    core.complete_clinic_setup(clinic_form())?;
    core.complete_profile(profile_form())?;
    Ok(())
}

#[test]
fn test_veterinarian_onboarding_to_dashboard() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;

    assert!(!core.enter_page("/dashboard".to_string())?.allowed);

    let redirect = core.login(
        "vet@clinic.com".to_string(),
        "veterinarian".to_string(),
        "en".to_string(),
    )?;
    assert_eq!(redirect.path, "/mfa");
    assert_eq!(redirect.delay_ms, 500);
    assert!(core.enter_page("/mfa".to_string())?.allowed);

    let err = core.verify_mfa("123 456".to_string()).unwrap_err();
    assert!(matches!(err, ClinicError::MfaMismatch));

    let redirect = core.verify_mfa("488519".to_string())?;
    assert_eq!(redirect.path, "/pre-confirmation");

    assert_eq!(core.complete_clinic_setup(clinic_form())?.path, "/post-confirmation");
    let redirect = core.complete_profile(profile_form())?;
    assert_eq!(redirect.path, "/dashboard");
    assert_eq!(redirect.delay_ms, 1_500);

    let first = core.enter_page("/dashboard".to_string())?;
    assert!(first.allowed && first.banner);
    let second = core.enter_page("/dashboard".to_string())?;
    assert!(second.allowed && !second.banner);

    let header = core.header()?;
    assert_eq!(header.display_name, "Dra. Laura Gómez");
    assert_eq!(header.language, "en");

    // Settings still see the clinic after the banner is consumed
    assert_eq!(core.clinic_settings()?.clinic_name, "Clínica Veterinaria San Martín");
    assert_eq!(core.profile_settings()?.professional_title, "surgeon");

    assert_eq!(core.save_clinic_settings(clinic_form())?, 3_000);
    assert_eq!(core.save_profile_settings(profile_form())?, 3_000);
    Ok(())
}

#[test]
fn test_client_signup_and_booking() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;

    let redirect = core.signup(FfiSignupForm {
        role: "client".to_string(),
        email: "owner@mail.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        full_name: "Juan Pérez".to_string(),
        phone: "+34 600 000 000".to_string(),
    })?;
    assert_eq!(redirect.path, "/book-appointment");
    assert!(core.enter_page("/book-appointment".to_string())?.allowed);
    assert!(!core.enter_page("/dashboard".to_string())?.allowed);

    let vets = core.veterinarians();
    assert_eq!(vets.len(), 3);

    let confirmation = core.book_appointment(FfiBookingForm {
        veterinarian: vets[2].id.clone(),
        owner_name: "Juan Pérez".to_string(),
        animal_type: "Rabbit".to_string(),
        breed: "Lop".to_string(),
        gender: "Male".to_string(),
        consultation_reason: "Not eating".to_string(),
    })?;
    assert_eq!(confirmation.redirect.path, "/my-appointments");
    assert_eq!(confirmation.appointment.veterinarian, "Dr. Sofia Hernandez");
    assert_eq!(confirmation.appointment.status, "pending");
    assert_eq!(confirmation.appointment.status_label, "Pending");
    assert_eq!(confirmation.appointment.animal_type, "rabbit");
    assert_eq!(confirmation.appointment.animal_type_label, "Rabbit");

    let list = core.list_appointments(None)?;
    assert_eq!(list.len(), 1);
    assert_eq!(core.list_appointments(Some("sofia".to_string()))?.len(), 1);
    assert!(core.list_appointments(Some("carlos".to_string()))?.is_empty());

    assert!(core.cancel_appointment(list[0].id.clone())?);
    assert!(core.list_appointments(None)?.is_empty());
    Ok(())
}

#[test]
fn test_booking_validation_errors_cross_ffi() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    let err = core
        .book_appointment(FfiBookingForm {
            veterinarian: "vet1".to_string(),
            owner_name: String::new(),
            animal_type: "Dog".to_string(),
            breed: "Beagle".to_string(),
            gender: "Female".to_string(),
            consultation_reason: "Cough".to_string(),
        })
        .unwrap_err();

    match err {
        ClinicError::Validation { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "ownerName");
            assert_eq!(errors[0].message, "Full name is required");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(core.list_appointments(None)?.is_empty());
    Ok(())
}

#[test]
fn test_report_draft_analysis_flow() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    onboard_veterinarian(&core)?;

    let redirect = core.enter_page("/report-analysis".to_string())?.redirect;
    assert_eq!(redirect.map(|r| r.path).as_deref(), Some("/reports/new"));

    let images = vec![
        FfiImageUpload {
            name: "lateral.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        },
        FfiImageUpload {
            name: "ventral.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![4, 5, 6],
        },
    ];
    let receipt = core.start_report_draft(report_form(&core, "Bella"), images)?;
    assert_eq!(receipt.redirect.path, "/report-analysis");
    assert!(core.enter_page("/report-analysis".to_string())?.allowed);

    let state = core.start_analysis()?;
    assert_eq!(state.image_count, 2);
    assert!(!state.has_prev && state.has_next);

    core.set_observations("No fracture visible".to_string())?;
    let state = core.analysis_next()?;
    assert_eq!(state.index, 1);
    let state = core.analysis_next()?;
    assert_eq!(state.index, 1);
    core.set_observations("Hairline fracture of the radius".to_string())?;

    assert_eq!(core.finish_analysis()?.path, "/dashboard");
    assert!(matches!(core.finish_analysis(), Err(ClinicError::NoDraft)));

    let report = core
        .get_report(receipt.report.id.clone())?
        .expect("stored report");
    assert_eq!(report.images.len(), 2);
    assert_eq!(report.images[0].image.name, "lateral.png");
    assert_eq!(report.images[0].image.bytes, vec![1, 2, 3]);
    assert_eq!(report.images[1].image.bytes, vec![4, 5, 6]);

    let first = report.images[0].note.as_ref().expect("first note");
    assert_eq!(first.partial_observations, "No fracture visible");
    let second = report.images[1].note.as_ref().expect("second note");
    assert_eq!(second.study_type, "radiography");
    assert_eq!(second.study_type_label, "Radiography");
    assert_eq!(second.study_reason, "Suspected fracture");
    assert_eq!(second.partial_observations, "Hairline fracture of the radius");

    let summary = core.dashboard(String::new(), false)?;
    assert_eq!(summary.total_reports, 1);
    assert_eq!(summary.active_reports, 1);
    Ok(())
}

#[test]
fn test_new_draft_replaces_open_analysis() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    onboard_veterinarian(&core)?;

    let upload = |name: &str, byte: u8| FfiImageUpload {
        name: name.to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![byte],
    };

    core.start_report_draft(report_form(&core, "Alpha"), vec![upload("alpha.png", 1)])?;
    core.start_analysis()?;
    core.set_observations("Alpha notes".to_string())?;

    let bravo = core.start_report_draft(report_form(&core, "Bravo"), vec![upload("bravo.png", 2)])?;

    // The Alpha session is gone and cannot clobber the Bravo draft
    assert!(matches!(core.finish_analysis(), Err(ClinicError::NoDraft)));
    assert!(matches!(core.set_observations("late".to_string()), Err(ClinicError::NoDraft)));
    assert!(core.list_reports(None)?.is_empty());
    assert!(core.enter_page("/report-analysis".to_string())?.allowed);

    let state = core.start_analysis()?;
    assert_eq!(state.image_count, 1);
    assert_eq!(state.current_image.as_ref().map(|i| i.name.as_str()), Some("bravo.png"));
    core.finish_analysis()?;

    let reports = core.list_reports(None)?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, bravo.report.id);
    assert_eq!(reports[0].animal_name, "Bravo");
    Ok(())
}

#[test]
fn test_direct_report_and_detail_page() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    onboard_veterinarian(&core)?;

    let receipt = core.create_report(report_form(&core, "Max"))?;
    assert_eq!(receipt.redirect.path, "/dashboard");
    assert_eq!(receipt.redirect.delay_ms, 2_500);

    let detail_path = format!("/reports/{}", receipt.report.id);
    assert!(core.enter_page(detail_path)?.allowed);

    let report = core.get_report(receipt.report.id.clone())?.expect("stored report");
    assert_eq!(report.species, "dog");
    assert_eq!(report.species_label, "Dog");
    assert_eq!(report.gender, "female");
    assert_eq!(report.gender_label, "Female");
    assert_eq!(report.study_type, "radiography");
    assert_eq!(report.study_type_label, "Radiography (X-Ray)");
    assert!(report.images.is_empty());
    assert_eq!(report.status, "En progreso");
    assert_eq!(report.status_label, "In Progress");

    assert!(core.remove_report(receipt.report.id.clone())?);
    assert!(core.get_report(receipt.report.id)?.is_none());
    Ok(())
}

#[test]
fn test_logout_clears_everything() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    onboard_veterinarian(&core)?;
    core.create_report(report_form(&core, "Max"))?;

    assert_eq!(core.logout()?.path, "/");
    assert!(!core.enter_page("/settings".to_string())?.allowed);
    assert!(core.list_reports(None)?.is_empty());
    assert!(!core.session_flags()?.mfa_verified);
    Ok(())
}

#[test]
fn test_unknown_page_and_language() -> anyhow::Result<()> {
    let core = open_session_in_memory()?;
    assert!(matches!(
        core.enter_page("/admin".to_string()),
        Err(ClinicError::InvalidInput { .. })
    ));
    assert!(core.set_language("fr".to_string()).is_err());
    core.set_language("en".to_string())?;
    assert_eq!(core.language()?, "en");
    Ok(())
}

#[test]
fn test_config_driven_core() -> anyhow::Result<()> {
    let config = Config {
        mfa_code: "135 790".to_string(),
        default_language: diagnovet_core::Language::En,
        ..Config::default()
    };
    let core = Arc::new(open_with_config(&config)?);

    assert_eq!(core.language()?, "en");
    core.login("vet@clinic.com".to_string(), "veterinarian".to_string(), "en".to_string())?;
    assert!(core.verify_mfa("488 519".to_string()).is_err());
    assert_eq!(core.verify_mfa("135790".to_string())?.path, "/pre-confirmation");
    Ok(())
}

#[test]
fn test_file_backed_session_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.db").to_string_lossy().to_string();

    {
        let core = open_session(path.clone())?;
        onboard_veterinarian(&core)?;
    }

    let core = open_session(path)?;
    assert!(core.enter_page("/settings".to_string())?.allowed);
    assert_eq!(core.header()?.display_name, "Dra. Laura Gómez");
    Ok(())
}

#[test]
fn test_schedule_grid() {
    let core = open_session_in_memory().unwrap();
    let grid = core.schedule();
    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0].today.iter().filter(|s| s.booked).count(), 2);
    assert!(grid.iter().all(|column| column.upcoming.len() == 3));
    assert_eq!(core.format_mfa_code("4885199".to_string()), "488 519");
}
