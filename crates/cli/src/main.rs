use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use hms_core::dates::{parse_date, parse_date_time};
use hms_core::ids::{new_appointment_id, new_lab_report_id, new_patient_id};
use hms_core::{
    constants::UNASSIGNED_DOCTOR_ID, data_dir_from_value, Appointment, CoreConfig, Doctor,
    Hospital, LabReport, Patient, PatientEdit, PersonFields, Role, Session, Staff, User,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod views;

use views::{
    print_one, print_rows, AppointmentView, DoctorView, LabReportView, PatientView, PersonView,
    StaffView, UserView,
};

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Hospital records CLI")]
struct Cli {
    /// Data directory (defaults to HMS_DATA_DIR, then ./data)
    #[arg(long, global = true)]
    data_dir: Option<String>,
    /// Username for commands that need a login
    #[arg(long, short, global = true)]
    user: Option<String>,
    /// Password for --user
    #[arg(long, short, global = true)]
    password: Option<String>,
    /// Print listings as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default accounts
    Init,
    /// Check credentials and show the account's role
    Login,
    /// Patient records
    #[command(subcommand)]
    Patients(PatientCommands),
    /// Doctor records
    #[command(subcommand)]
    Doctors(DoctorCommands),
    /// Staff records
    #[command(subcommand)]
    Staff(StaffCommands),
    /// Appointments
    #[command(subcommand)]
    Appointments(AppointmentCommands),
    /// Lab reports
    #[command(subcommand)]
    Labs(LabCommands),
    /// Login accounts
    #[command(subcommand)]
    Users(UserCommands),
    /// Everyone on record: patients, doctors and staff
    People,
}

#[derive(Subcommand)]
enum PatientCommands {
    /// List all patients
    List,
    /// Register a new patient
    Register {
        name: String,
        age: i32,
        contact: String,
        /// Patient id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Date of birth (dd-MM-yyyy)
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        history: Option<String>,
    },
    /// Change fields of an existing patient
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Date of birth (dd-MM-yyyy)
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        history: Option<String>,
    },
    /// Admit a patient
    Admit {
        id: String,
        /// Admission date (dd-MM-yyyy, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Discharge a patient
    Discharge { id: String },
    /// Delete a patient
    Delete { id: String },
    /// Find patients by name
    Search {
        query: String,
        /// Match the whole name instead of a substring
        #[arg(long)]
        exact: bool,
    },
    /// Write all patients to a CSV report
    Export {
        /// Report path (defaults to patient_report_<millis>.csv in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DoctorCommands {
    /// List all doctors
    List,
    /// Add a doctor
    Add {
        #[command(flatten)]
        person: PersonArgs,
        #[arg(long)]
        specialization: Option<String>,
        /// Free text, e.g. "Mon-Fri 09:00-15:00"
        #[arg(long)]
        duty_timings: Option<String>,
    },
}

#[derive(Subcommand)]
enum StaffCommands {
    /// List all staff
    List,
    /// Add a staff member
    Add {
        #[command(flatten)]
        person: PersonArgs,
        /// Job title, e.g. Nurse or WardBoy
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        shift: Option<String>,
    },
}

#[derive(Subcommand)]
enum AppointmentCommands {
    /// List all appointments
    List,
    /// Book an appointment
    Book {
        patient_id: String,
        doctor_id: String,
        /// Slot (dd-MM-yyyy HH:mm)
        datetime: String,
        #[arg(long)]
        reason: Option<String>,
        /// Appointment id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Subcommand)]
enum LabCommands {
    /// List all lab reports
    List,
    /// File a lab report
    Add {
        patient_id: String,
        test_name: String,
        #[arg(long)]
        result: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Requesting doctor (defaults to N/A)
        #[arg(long)]
        doctor_id: Option<String>,
        /// Report date (dd-MM-yyyy, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Report id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all accounts
    List,
    /// Add an account
    Add {
        username: String,
        #[arg(long = "new-password")]
        new_password: String,
        /// Admin, Doctor, Nurse or Receptionist
        role: String,
    },
}

#[derive(Args)]
struct PersonArgs {
    id: String,
    name: String,
    contact: String,
    /// Date of birth (dd-MM-yyyy)
    #[arg(long)]
    dob: Option<String>,
}

impl PersonArgs {
    fn into_fields(self) -> anyhow::Result<PersonFields> {
        let dob = self.dob.as_deref().map(|d| parse_date("dob", d)).transpose()?;
        Ok(PersonFields::new(&self.id, &self.name, dob, &self.contact)?)
    }
}

/// Main entry point for the `hms` command.
///
/// Resolves configuration, opens the records, seeds the default accounts when there
/// are none, then runs one subcommand.
///
/// # Environment Variables
/// - `HMS_DATA_DIR`: data directory when `--data-dir` is not given (default: "data")
/// - `RUST_LOG`: log filter (default directive: "hms=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hms=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = data_dir_from_value(
        cli.data_dir
            .clone()
            .or_else(|| std::env::var("HMS_DATA_DIR").ok()),
    );
    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    tracing::info!("using data directory {}", cfg.data_dir().display());

    let hospital = Hospital::open(cfg).context("failed to open hospital records")?;
    for warning in hospital.load_warnings() {
        tracing::warn!("{}", warning);
    }

    if hospital.seed_default_accounts()? {
        tracing::info!("created default accounts in an empty user store");
    } else {
        tracing::debug!("{} accounts already present", hospital.users().len());
    }

    let Some(command) = cli.command else {
        println!("Use 'hms --help' for commands");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!(
                "Records ready in {} ({} accounts)",
                hospital.data_dir().display(),
                hospital.users().len()
            );
        }
        Commands::Login => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            println!(
                "Logged in as {} ({})",
                session.user().username(),
                session.role()
            );
        }
        Commands::Patients(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            run_patients(&hospital, &session, cmd, cli.json)?;
        }
        Commands::Doctors(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            match cmd {
                DoctorCommands::List => {
                    let rows: Vec<DoctorView> = hospital
                        .list_doctors(&session)?
                        .iter()
                        .map(|d| DoctorView::new(&session, d))
                        .collect();
                    print_rows(&rows, cli.json, "No doctors found.")?;
                }
                DoctorCommands::Add {
                    person,
                    specialization,
                    duty_timings,
                } => {
                    let doctor = Doctor::new(
                        person.into_fields()?,
                        specialization.as_deref(),
                        duty_timings.as_deref(),
                    );
                    let doctor = hospital.add_doctor(&session, doctor)?;
                    print_one(&DoctorView::new(&session, &doctor), cli.json)?;
                }
            }
        }
        Commands::Staff(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            match cmd {
                StaffCommands::List => {
                    let rows: Vec<StaffView> = hospital
                        .list_staff(&session)?
                        .iter()
                        .map(|s| StaffView::new(&session, s))
                        .collect();
                    print_rows(&rows, cli.json, "No staff found.")?;
                }
                StaffCommands::Add {
                    person,
                    role,
                    shift,
                } => {
                    let staff =
                        Staff::new(person.into_fields()?, role.as_deref(), shift.as_deref());
                    let staff = hospital.add_staff(&session, staff)?;
                    print_one(&StaffView::new(&session, &staff), cli.json)?;
                }
            }
        }
        Commands::Appointments(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            match cmd {
                AppointmentCommands::List => {
                    let rows: Vec<AppointmentView> = hospital
                        .list_appointments(&session)?
                        .iter()
                        .map(AppointmentView::from)
                        .collect();
                    print_rows(&rows, cli.json, "No appointments found.")?;
                }
                AppointmentCommands::Book {
                    patient_id,
                    doctor_id,
                    datetime,
                    reason,
                    id,
                } => {
                    let slot = parse_date_time("datetime", &datetime)?;
                    let id = id.unwrap_or_else(new_appointment_id);
                    let appointment =
                        Appointment::new(&id, &patient_id, &doctor_id, slot, reason.as_deref())?;
                    let appointment = hospital.book_appointment(&session, appointment)?;
                    print_one(&AppointmentView::from(&appointment), cli.json)?;
                }
            }
        }
        Commands::Labs(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            match cmd {
                LabCommands::List => {
                    let rows: Vec<LabReportView> = hospital
                        .list_lab_reports(&session)?
                        .iter()
                        .map(LabReportView::from)
                        .collect();
                    print_rows(&rows, cli.json, "No lab reports found.")?;
                }
                LabCommands::Add {
                    patient_id,
                    test_name,
                    result,
                    notes,
                    doctor_id,
                    date,
                    id,
                } => {
                    let date = match date {
                        Some(d) => parse_date("date", &d)?,
                        None => chrono::Local::now().date_naive(),
                    };
                    let id = id.unwrap_or_else(new_lab_report_id);
                    let doctor_id = doctor_id.unwrap_or_else(|| UNASSIGNED_DOCTOR_ID.to_string());
                    let report = LabReport::new(
                        &id,
                        &patient_id,
                        &doctor_id,
                        date,
                        Some(&test_name),
                        result.as_deref(),
                        notes.as_deref(),
                    )?;
                    let report = hospital.add_lab_report(&session, report)?;
                    print_one(&LabReportView::from(&report), cli.json)?;
                }
            }
        }
        Commands::Users(cmd) => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            match cmd {
                UserCommands::List => {
                    let rows: Vec<UserView> = hospital
                        .list_users(&session)?
                        .iter()
                        .map(UserView::from)
                        .collect();
                    print_rows(&rows, cli.json, "No accounts found.")?;
                }
                UserCommands::Add {
                    username,
                    new_password,
                    role,
                } => {
                    let role: Role = role.parse()?;
                    let user = User::new(&username, &new_password, role)?;
                    let user = hospital.add_user(&session, user)?;
                    print_one(&UserView::from(&user), cli.json)?;
                }
            }
        }
        Commands::People => {
            let session = login(&hospital, &cli.user, &cli.password)?;
            let rows: Vec<PersonView> = hospital
                .directory(&session)?
                .iter()
                .map(|p| PersonView::new(&session, p))
                .collect();
            print_rows(&rows, cli.json, "Nobody on record.")?;
        }
    }

    Ok(())
}

fn login(
    hospital: &Hospital,
    user: &Option<String>,
    password: &Option<String>,
) -> anyhow::Result<Session> {
    let (Some(user), Some(password)) = (user, password) else {
        bail!("this command needs --user and --password");
    };
    Ok(hospital.login(user, password)?)
}

fn run_patients(
    hospital: &Hospital,
    session: &Session,
    cmd: PatientCommands,
    json: bool,
) -> anyhow::Result<()> {
    let view = |p: &Patient| PatientView::new(session, p);

    match cmd {
        PatientCommands::List => {
            let rows: Vec<PatientView> =
                hospital.list_patients(session)?.iter().map(view).collect();
            print_rows(&rows, json, "No patients found.")?;
        }
        PatientCommands::Register {
            name,
            age,
            contact,
            id,
            dob,
            gender,
            address,
            history,
        } => {
            let id = id.unwrap_or_else(new_patient_id);
            let dob = dob.as_deref().map(|d| parse_date("dob", d)).transpose()?;
            let patient = Patient::new(
                PersonFields::new(&id, &name, dob, &contact)?,
                age,
                gender.as_deref(),
                address.as_deref(),
                history.as_deref(),
            )?;
            let patient = hospital.register_patient(session, patient)?;
            print_one(&view(&patient), json)?;
        }
        PatientCommands::Edit {
            id,
            name,
            dob,
            contact,
            age,
            gender,
            address,
            history,
        } => {
            let edit = PatientEdit {
                name,
                date_of_birth: dob.as_deref().map(|d| parse_date("dob", d)).transpose()?,
                contact,
                age,
                gender,
                address,
                medical_history: history,
            };
            let patient = hospital.edit_patient(session, &id, edit)?;
            print_one(&view(&patient), json)?;
        }
        PatientCommands::Admit { id, date } => {
            let patient = match date {
                Some(d) => hospital.admit_patient_on(session, &id, parse_date("date", &d)?)?,
                None => hospital.admit_patient(session, &id)?,
            };
            print_one(&view(&patient), json)?;
        }
        PatientCommands::Discharge { id } => {
            let patient = hospital.discharge_patient(session, &id)?;
            print_one(&view(&patient), json)?;
        }
        PatientCommands::Delete { id } => {
            let removed = hospital.delete_patient(session, &id)?;
            println!("Deleted {} record(s) for patient {}", removed, id.trim());
        }
        PatientCommands::Search { query, exact } => {
            let rows: Vec<PatientView> = hospital
                .search_patients(session, &query, exact)?
                .iter()
                .map(view)
                .collect();
            print_rows(&rows, json, "No matching patients.")?;
        }
        PatientCommands::Export { output } => {
            let path = hospital.export_patients(session, output)?;
            println!("Exported patients to {}", path.display());
        }
    }

    Ok(())
}
