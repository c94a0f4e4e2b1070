use anyhow::{anyhow, Context};
use bridge_core::{
    constants, AttributeTypeMatch, FhirPatientService, FhirTranslator, InMemoryPatientLookup,
    PatientResourceProvider, TranslatorConfig, TranslatorService,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fhir::{Patient, Person, WireFormat};
use records::{PatientRecord, PersonRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fhir-bridge")]
#[command(about = "Translate clinical records to and from FHIR resources")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Attribute type name that marks a contact value
    #[arg(
        long,
        global = true,
        env = "FHIR_CONTACT_ATTRIBUTE_TYPE",
        default_value = constants::DEFAULT_CONTACT_ATTRIBUTE_TYPE
    )]
    contact_attribute_type: String,

    /// How attribute type names are compared (exact or ignore-case)
    #[arg(
        long,
        global = true,
        env = "FHIR_CONTACT_ATTRIBUTE_MATCH",
        default_value = "exact",
        conflicts_with = "match_case_insensitive"
    )]
    contact_attribute_match: String,

    /// Shorthand for --contact-attribute-match ignore-case
    #[arg(long, global = true)]
    match_case_insensitive: bool,

    /// Reason recorded when an inactive resource voids a record
    #[arg(
        long,
        global = true,
        env = "FHIR_VOID_REASON",
        default_value = constants::VOIDED_BY_FHIR_MODULE
    )]
    void_reason: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a patient record to a FHIR Patient
    PatientToFhir {
        /// Patient record file (.json, .yaml or .yml)
        input: PathBuf,
        /// Output format (default: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Translate a FHIR Patient to a patient record
    FhirToPatient {
        /// FHIR Patient file (.json, .yaml or .yml)
        input: PathBuf,
        /// Output format (default: yaml)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Translate a person record to a FHIR Person
    PersonToFhir {
        /// Person record file (.json, .yaml or .yml)
        input: PathBuf,
        /// Output format (default: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Translate a FHIR Person to a person record
    FhirToPerson {
        /// FHIR Person file (.json, .yaml or .yml)
        input: PathBuf,
        /// Output format (default: yaml)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Read one patient from a list of patient records as a FHIR Patient
    GetPatient {
        /// File holding a list of patient records
        input: PathBuf,
        /// Patient id (record uuid)
        id: String,
        /// Output format (default: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Search a list of patient records, printing a FHIR searchset Bundle
    SearchPatients {
        /// File holding a list of patient records
        input: PathBuf,
        /// Match any part of any name
        #[arg(long, group = "query")]
        name: Option<String>,
        /// Match given names
        #[arg(long, group = "query")]
        given: Option<String>,
        /// Match family names
        #[arg(long, group = "query")]
        family: Option<String>,
        /// Output format (default: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for WireFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => WireFormat::Json,
            OutputFormat::Yaml => WireFormat::Yaml,
        }
    }
}

/// Main entry point for the fhir-bridge command line.
///
/// Loads `.env` if present, initialises logging to stderr, resolves translator configuration once
/// and runs the selected command, writing its document to stdout.
///
/// # Environment Variables
/// - `FHIR_CONTACT_ATTRIBUTE_TYPE`: contact attribute type name (default: "contact")
/// - `FHIR_CONTACT_ATTRIBUTE_MATCH`: `exact` or `ignore-case` (default: "exact")
/// - `FHIR_VOID_REASON`: reason recorded on voiding (default: "Voided by FHIR module")
/// - `RUST_LOG`: log filter
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fhir_bridge=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let cfg = Arc::new(resolve_config(&cli.config)?);
    let service = TranslatorService::new(cfg.clone());
    tracing::debug!(
        contact_attribute_type = service.config().contact_attribute_type(),
        attribute_type_match = ?service.config().attribute_type_match(),
        "translator configuration resolved"
    );

    let Some(command) = cli.command else {
        writeln!(out, "Use 'fhir-bridge --help' for commands")?;
        return Ok(());
    };

    let document = match command {
        Commands::PatientToFhir { input, format } => {
            let patient = read_patient(&input)?;
            let resource = service.patient().to_fhir(&patient)?;
            tracing::info!(id = ?resource.id, "translated patient to FHIR");
            Patient::render(&resource, fhir_output(format))?
        }
        Commands::FhirToPatient { input, format } => {
            let (text, wire) = read_input(&input)?;
            let resource = Patient::parse(&text, wire)?;
            let patient = service.patient().to_record(&resource)?;
            tracing::info!(uuid = ?patient.uuid(), "translated FHIR patient to record");
            write_patient(&patient, record_output(format))?
        }
        Commands::PersonToFhir { input, format } => {
            let person = read_person(&input)?;
            let resource = service.person().to_fhir(&person)?;
            tracing::info!(id = ?resource.id, "translated person to FHIR");
            Person::render(&resource, fhir_output(format))?
        }
        Commands::FhirToPerson { input, format } => {
            let (text, wire) = read_input(&input)?;
            let resource = Person::parse(&text, wire)?;
            let person = service.person().to_record(&resource)?;
            tracing::info!(uuid = ?person.uuid, "translated FHIR person to record");
            write_person(&person, record_output(format))?
        }
        Commands::GetPatient { input, id, format } => {
            let provider = provider_for(&input, cfg)?;
            let resource = provider.get_patient_by_id(&id)?;
            Patient::render(&resource, fhir_output(format))?
        }
        Commands::SearchPatients {
            input,
            name,
            given,
            family,
            format,
        } => {
            let provider = provider_for(&input, cfg)?;
            let bundle = match (name, given, family) {
                (Some(name), _, _) => provider.find_patients_by_name(&name)?,
                (None, Some(given), _) => provider.find_patients_by_given_name(&given)?,
                (None, None, Some(family)) => provider.find_patients_by_family_name(&family)?,
                (None, None, None) => {
                    return Err(anyhow!("one of --name, --given or --family is required"))
                }
            };
            tracing::info!(total = bundle.total, "patient search complete");
            bundle.render(fhir_output(format))?
        }
    };

    out.write_all(document.as_bytes())?;
    if !document.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn resolve_config(args: &ConfigArgs) -> anyhow::Result<TranslatorConfig> {
    let attribute_type_match = if args.match_case_insensitive {
        AttributeTypeMatch::IgnoreCase
    } else {
        args.contact_attribute_match.parse()?
    };
    Ok(TranslatorConfig::new(
        &args.contact_attribute_type,
        attribute_type_match,
        &args.void_reason,
    )?)
}

fn fhir_output(format: Option<OutputFormat>) -> WireFormat {
    format.map(WireFormat::from).unwrap_or(WireFormat::Json)
}

fn record_output(format: Option<OutputFormat>) -> WireFormat {
    format.map(WireFormat::from).unwrap_or(WireFormat::Yaml)
}

/// Reads a file and picks its format from the extension.
fn read_input(path: &Path) -> anyhow::Result<(String, WireFormat)> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(WireFormat::from_extension)
        .ok_or_else(|| {
            anyhow!(
                "cannot tell the format of {}: expected a .json, .yaml or .yml file",
                path.display()
            )
        })?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok((text, format))
}

fn read_patient(path: &Path) -> anyhow::Result<PatientRecord> {
    let (text, format) = read_input(path)?;
    let patient = match format {
        WireFormat::Json => records::read_patient_json(&text)?,
        WireFormat::Yaml => records::read_patient_yaml(&text)?,
    };
    Ok(patient)
}

fn read_patients(path: &Path) -> anyhow::Result<Vec<PatientRecord>> {
    let (text, format) = read_input(path)?;
    let patients = match format {
        WireFormat::Json => records::read_patients_json(&text)?,
        WireFormat::Yaml => records::read_patients_yaml(&text)?,
    };
    Ok(patients)
}

fn read_person(path: &Path) -> anyhow::Result<PersonRecord> {
    let (text, format) = read_input(path)?;
    let person = match format {
        WireFormat::Json => records::read_person_json(&text)?,
        WireFormat::Yaml => records::read_person_yaml(&text)?,
    };
    Ok(person)
}

fn write_patient(patient: &PatientRecord, format: WireFormat) -> anyhow::Result<String> {
    Ok(match format {
        WireFormat::Json => records::write_patient_json(patient)?,
        WireFormat::Yaml => records::write_patient_yaml(patient)?,
    })
}

fn write_person(person: &PersonRecord, format: WireFormat) -> anyhow::Result<String> {
    Ok(match format {
        WireFormat::Json => records::write_person_json(person)?,
        WireFormat::Yaml => records::write_person_yaml(person)?,
    })
}

fn provider_for(
    path: &Path,
    cfg: Arc<TranslatorConfig>,
) -> anyhow::Result<PatientResourceProvider<InMemoryPatientLookup>> {
    let lookup = InMemoryPatientLookup::new(read_patients(path)?);
    tracing::debug!(patients = lookup.len(), "loaded patient records");
    Ok(PatientResourceProvider::new(FhirPatientService::with_config(
        lookup, cfg,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write input");
        path
    }

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("fhir-bridge").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    const PATIENT_YAML: &str = r#"person:
  uuid: 123456-abcdef-123456
  voided: true
  gender: M
  names:
    - given_name: Jean Claude
      family_name: van Damme
identifiers:
  - uuid: 654321-fedcba-654321
    identifier: MRN-1
    preferred: true
"#;

    const PATIENTS_JSON: &str = r#"[
  {"person": {"uuid": "p1", "names": [{"given_name": "Jean", "family_name": "van Damme"}]}},
  {"person": {"uuid": "p2", "names": [{"given_name": "Jane", "family_name": "Doe"}]}}
]"#;

    #[test]
    fn patient_to_fhir_renders_json() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(&dir, "patient.yaml", PATIENT_YAML);

        let output = run_args(&["patient-to-fhir", input.to_str().expect("path")]).expect("run");
        let resource = Patient::parse(&output, WireFormat::Json).expect("valid patient json");
        assert_eq!(resource.id.as_deref(), Some("123456-abcdef-123456"));
        assert_eq!(resource.active, Some(false));
        assert!(output.contains("\"active\": false"));
        assert!(output.contains("\"gender\": \"male\""));
    }

    #[test]
    fn fhir_to_patient_voids_inactive_resource() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(
            &dir,
            "patient.json",
            r#"{"resourceType": "Patient", "id": "abc", "active": false}"#,
        );

        let output = run_args(&["fhir-to-patient", input.to_str().expect("path")]).expect("run");
        let patient = records::read_patient_yaml(&output).expect("yaml record");
        assert_eq!(patient.uuid(), Some("abc"));
        assert!(patient.person.voided);
        assert_eq!(
            patient.person.void_reason.as_deref(),
            Some("Voided by FHIR module")
        );
    }

    #[test]
    fn void_reason_option_is_used() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(
            &dir,
            "person.yaml",
            "resourceType: Person\nid: abc\nactive: false\n",
        );

        let output = run_args(&[
            "--void-reason",
            "Merged",
            "fhir-to-person",
            input.to_str().expect("path"),
            "--format",
            "json",
        ])
        .expect("run");
        let person = records::read_person_json(&output).expect("json record");
        assert_eq!(person.void_reason.as_deref(), Some("Merged"));
    }

    #[test]
    fn person_to_fhir_respects_contact_type_matching() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(
            &dir,
            "person.json",
            r#"{"uuid": "p1", "attributes": [
                {"uuid": "a1", "value": "0723781237", "attribute_type": {"name": "Contact"}}
            ]}"#,
        );
        let path = input.to_str().expect("path");

        let exact = run_args(&["person-to-fhir", path]).expect("run");
        assert!(!exact.contains("0723781237"));

        let relaxed = run_args(&["--match-case-insensitive", "person-to-fhir", path]).expect("run");
        assert!(relaxed.contains("0723781237"));
    }

    #[test]
    fn search_patients_prints_bundle() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(&dir, "patients.json", PATIENTS_JSON);

        let output = run_args(&[
            "search-patients",
            input.to_str().expect("path"),
            "--family",
            "doe",
        ])
        .expect("run");
        assert!(output.contains("\"resourceType\": \"Bundle\""));
        assert!(output.contains("\"total\": 1"));
        assert!(output.contains("Patient/p2"));
    }

    #[test]
    fn get_patient_reports_missing_id() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(&dir, "patients.json", PATIENTS_JSON);

        let err = run_args(&["get-patient", input.to_str().expect("path"), "nope"])
            .expect_err("missing patient");
        assert_eq!(err.to_string(), "Could not find patient with Id nope");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_file(&dir, "patient.txt", PATIENT_YAML);

        let err = run_args(&["patient-to-fhir", input.to_str().expect("path")])
            .expect_err("unknown extension");
        assert!(err.to_string().contains("cannot tell the format"));
    }

    #[test]
    fn rejects_blank_contact_type() {
        let err = run_args(&["--contact-attribute-type", " "]).expect_err("blank config");
        assert!(err.to_string().contains("contact_attribute_type"));
    }

    #[test]
    fn default_options_match_default_config() {
        let cli = Cli::try_parse_from(["fhir-bridge"]).expect("parse");
        let cfg = resolve_config(&cli.config).expect("valid defaults");
        assert_eq!(cfg, TranslatorConfig::default());
    }

    #[test]
    fn case_insensitive_flag_conflicts_with_explicit_match() {
        let err = Cli::try_parse_from([
            "fhir-bridge",
            "--match-case-insensitive",
            "--contact-attribute-match",
            "exact",
        ])
        .err()
        .expect("conflicting options");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
