use crate::cli::ScoreArgs;
use drugshield::intake::{read_interactions_from_path, read_medications_from_path};
use drugshield::{IntakeError, ScoreRequest};
use std::path::PathBuf;

/// Where the `score` command reads its case from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestSource {
    CaseFile(PathBuf),
    Csv {
        age: u16,
        medications: PathBuf,
        interactions: Option<PathBuf>,
    },
}

impl TryFrom<&ScoreArgs> for RequestSource {
    type Error = IntakeError;

    fn try_from(args: &ScoreArgs) -> Result<Self, Self::Error> {
        if let Some(case) = &args.case {
            return Ok(Self::CaseFile(case.clone()));
        }

        match (args.age, &args.medications) {
            (Some(age), Some(medications)) => Ok(Self::Csv {
                age,
                medications: medications.clone(),
                interactions: args.interactions.clone(),
            }),
            _ => Err(IntakeError::MissingInput),
        }
    }
}

pub(crate) fn load_request(source: &RequestSource) -> Result<ScoreRequest, IntakeError> {
    match source {
        RequestSource::CaseFile(path) => ScoreRequest::from_json_path(path),
        RequestSource::Csv {
            age,
            medications,
            interactions,
        } => {
            let medications = read_medications_from_path(medications)?;
            let interactions = match interactions {
                Some(path) => read_interactions_from_path(path)?,
                None => Vec::new(),
            };
            Ok(ScoreRequest::new(*age, medications, interactions))
        }
    }
}

pub(crate) fn parse_score(raw: &str) -> Result<f64, String> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (0.0..=10.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("score {score} is outside 0..=10"))
    }
}
