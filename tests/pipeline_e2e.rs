//! End-to-end pipeline tests with stubbed collaborators.
//!
//! A fixed 4-turn conversation flows through structuring, voice assignment,
//! synthesis dispatch, and assembly; the tests pin down the one invariant
//! the design exists to protect — turn order survives every stage.

use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::Arc;
use std::time::Duration;
use vodcast::audio::Assembler;
use vodcast::config::{
    AnalyzerOptions, AzureOpenAiConfig, HostedServiceConfig, PodcastConfig, SynthesisConfig,
};
use vodcast::llm::CompletionApi;
use vodcast::tts::{SpeechJob, SpeechService};
use vodcast::{PodcastError, PodcastPipeline, PodcastRequest, Result};

const UNSTRUCTURED_SCRIPT: &str = "\
:::::::::conversation::::::::::
Sam: Did you see that knife skills video?
Jane: I did, the chef was incredible.
Sam: The speed of the julienne cuts amazed me.
Jane: Same, I am buying a sharpening stone tonight.
:::::::::::::::::::::::::::::::";

/// Completion stub: fixed prose, fixed 4-turn structuring payload.
struct ScriptedLlm {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionApi for ScriptedLlm {
    async fn complete(&self, prompt: &str, _temperature: f64) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        Ok(UNSTRUCTURED_SCRIPT.to_owned())
    }

    async fn complete_with_schema(
        &self,
        prompt: &str,
        _function: serde_json::Value,
        _function_name: &str,
    ) -> Result<serde_json::Value> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        Ok(json!({
            "dialogues": [
                {"name": "Sam", "dialogue": "Did you see that knife skills video?"},
                {"name": "Jane", "dialogue": "I did, the chef was incredible."},
                {"name": "Sam", "dialogue": "The speed of the julienne cuts amazed me."},
                {"name": "Jane", "dialogue": "Same, I am buying a sharpening stone tonight."},
            ]
        }))
    }
}

/// Synthesis stub: records submissions and completes jobs out of order.
struct RecordingSpeech {
    submissions: Arc<Mutex<Vec<(usize, String, String)>>>,
}

impl SpeechService for RecordingSpeech {
    fn submit(&self, index: usize, voice: &str, text: &str) -> SpeechJob {
        self.submissions
            .lock()
            .unwrap()
            .push((index, voice.to_owned(), text.to_owned()));
        // Earlier turns take longer, so remote completion order is reversed.
        let delay = Duration::from_millis(40 - 10 * index as u64);
        SpeechJob::spawn(async move {
            tokio::time::sleep(delay).await;
            Ok(PathBuf::from(format!("clip_{index}.wav")))
        })
    }
}

/// Assembler stub: records the clip lists it is handed.
struct RecordingAssembler {
    calls: Arc<Mutex<Vec<Vec<PathBuf>>>>,
}

#[async_trait]
impl Assembler for RecordingAssembler {
    async fn concatenate(&self, clips: &[PathBuf], output: &Path) -> Result<PathBuf> {
        self.calls.lock().unwrap().push(clips.to_vec());
        Ok(output.to_path_buf())
    }
}

fn test_config() -> PodcastConfig {
    PodcastConfig {
        azure: AzureOpenAiConfig {
            api_key: "key".to_owned(),
            api_version: "2024-02-01".to_owned(),
            endpoint: "https://unused.example.com".to_owned(),
            deployment: "gpt-4o".to_owned(),
        },
        hosted: HostedServiceConfig {
            api_url: "https://unused.example.com".to_owned(),
            api_key: "sk-unused".to_owned(),
            poll_interval_ms: 10,
        },
        synthesis: SynthesisConfig::default(),
        analyzer: AnalyzerOptions::default(),
        output_path: PathBuf::from("output.wav"),
    }
}

#[tokio::test]
async fn four_turn_conversation_flows_through_in_order() {
    let llm = Arc::new(ScriptedLlm {
        prompts: Mutex::new(Vec::new()),
    });
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let speech = Arc::new(RecordingSpeech {
        submissions: Arc::clone(&submissions),
    });
    let concat_calls = Arc::new(Mutex::new(Vec::new()));
    let assembler = Arc::new(RecordingAssembler {
        calls: Arc::clone(&concat_calls),
    });

    let work_dir = tempfile::tempdir().unwrap();
    let pipeline = PodcastPipeline::with_components(
        test_config(),
        Arc::clone(&llm) as Arc<dyn CompletionApi>,
        speech,
        assembler,
        work_dir.path().to_path_buf(),
    )
    .unwrap();

    let request = PodcastRequest::new("https://example.com/video");
    let output = pipeline
        .run_from_summary("A chef demonstrates knife skills.", &request)
        .await
        .unwrap();
    assert_eq!(output, PathBuf::from("output.wav"));

    // Both completion calls happened, in order: prose first, structuring second.
    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("A chef demonstrates knife skills."));
    assert!(prompts[1].contains("Did you see that knife skills video?"));

    // Exactly 4 jobs, submitted in turn order, voices per name match.
    let synthesis = SynthesisConfig::default();
    let submitted = submissions.lock().unwrap();
    assert_eq!(submitted.len(), 4);
    assert_eq!(
        submitted.iter().map(|(i, _, _)| *i).collect::<Vec<_>>(),
        [0, 1, 2, 3]
    );
    assert_eq!(submitted[0].1, synthesis.male_voice);
    assert_eq!(submitted[1].1, synthesis.female_voice);
    assert_eq!(submitted[2].1, synthesis.male_voice);
    assert_eq!(submitted[3].1, synthesis.female_voice);
    assert_eq!(submitted[0].2, "Did you see that knife skills video?");

    // One concatenation call, clips in original turn order even though the
    // stub jobs completed in reverse.
    let calls = concat_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let names: Vec<_> = calls[0]
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["clip_0.wav", "clip_1.wav", "clip_2.wav", "clip_3.wav"]);
}

#[tokio::test]
async fn structuring_failure_stops_before_any_synthesis() {
    struct BrokenLlm;

    #[async_trait]
    impl CompletionApi for BrokenLlm {
        async fn complete(&self, _prompt: &str, _temperature: f64) -> Result<String> {
            Ok("some prose".to_owned())
        }

        async fn complete_with_schema(
            &self,
            _prompt: &str,
            _function: serde_json::Value,
            _function_name: &str,
        ) -> Result<serde_json::Value> {
            // Payload violates the schema: empty dialogue list.
            Ok(json!({"dialogues": []}))
        }
    }

    let submissions = Arc::new(Mutex::new(Vec::new()));
    let speech = Arc::new(RecordingSpeech {
        submissions: Arc::clone(&submissions),
    });
    let concat_calls = Arc::new(Mutex::new(Vec::new()));
    let assembler = Arc::new(RecordingAssembler {
        calls: Arc::clone(&concat_calls),
    });

    let work_dir = tempfile::tempdir().unwrap();
    let pipeline = PodcastPipeline::with_components(
        test_config(),
        Arc::new(BrokenLlm),
        speech,
        assembler,
        work_dir.path().to_path_buf(),
    )
    .unwrap();

    let request = PodcastRequest::new("https://example.com/video");
    let err = pipeline
        .run_from_summary("summary", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, PodcastError::DataFormat(_)));
    assert!(submissions.lock().unwrap().is_empty());
    assert!(concat_calls.lock().unwrap().is_empty());
}
