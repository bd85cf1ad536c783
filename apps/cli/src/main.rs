use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{AnalysisPhase, AppCore, CoreEvent, FileImageSource, View};
use shared::domain::{MoodBefore, SocialContext};

/// Headless driver for the coaching client core: sign in, optionally submit
/// one meal photo for analysis, and print the resulting state.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Path to a meal photo to analyze after signing in.
    #[arg(long)]
    image: Option<std::path::PathBuf>,
    #[arg(long, default_value = "neutral")]
    mood: String,
    #[arg(long, default_value = "alone")]
    context: String,
}

fn parse_mood(value: &str) -> Result<MoodBefore> {
    match value {
        "happy" => Ok(MoodBefore::Happy),
        "neutral" => Ok(MoodBefore::Neutral),
        "stressed" => Ok(MoodBefore::Stressed),
        "sad" => Ok(MoodBefore::Sad),
        "excited" => Ok(MoodBefore::Excited),
        other => Err(anyhow!("unknown mood: {other}")),
    }
}

fn parse_context(value: &str) -> Result<SocialContext> {
    match value {
        "alone" => Ok(SocialContext::Alone),
        "family" => Ok(SocialContext::Family),
        "friends" => Ok(SocialContext::Friends),
        "work" => Ok(SocialContext::Work),
        other => Err(anyhow!("unknown social context: {other}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let mood = parse_mood(&args.mood)?;
    let context = parse_context(&args.context)?;

    let core = AppCore::connect(&args.server_url)?;
    let mut events = core.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                CoreEvent::Notice(message) => println!("* {message}"),
                CoreEvent::BadgesEarned(names) => println!("* New badges: {}", names.join(", ")),
                CoreEvent::StateChanged(_) => {}
            }
        }
    });

    core.bootstrap().await;
    if core.snapshot().await.view == View::Login {
        core.login(&args.email, &args.password).await;
    }

    let snapshot = core.snapshot().await;
    let Some(profile) = snapshot.profile else {
        return Err(anyhow!(
            "sign-in failed: {}",
            snapshot.error.unwrap_or_else(|| "unknown error".into())
        ));
    };
    println!(
        "Signed in as {} (level {}, {} XP, {}-day streak)",
        profile.username, profile.level, profile.total_xp, profile.streak_days
    );

    if let Some(path) = args.image {
        let source = FileImageSource::new(path);
        core.analyze_image(&source, mood, context).await;

        let snapshot = core.snapshot().await;
        match snapshot.analysis_phase {
            AnalysisPhase::Succeeded | AnalysisPhase::Failed => {
                let result = snapshot
                    .analysis_result
                    .ok_or_else(|| anyhow!("analysis finished without a result"))?;
                println!("Foods: {}", result.foods_detected.join(", "));
                println!(
                    "{} kcal | {}g protein | {}g carbs | {}g fat",
                    result.nutrition.calories,
                    result.nutrition.protein,
                    result.nutrition.carbs,
                    result.nutrition.fat
                );
                println!(
                    "Health score {}/10 ({})",
                    result.health_assessment.score, result.health_assessment.obesity_risk
                );
                println!("{}", result.ai_feedback);
                for suggestion in &result.suggestions {
                    println!("- {suggestion}");
                }
                if let Some(error) = snapshot.error {
                    eprintln!("warning: {error}");
                }
            }
            phase => eprintln!("analysis did not finish (phase {phase:?})"),
        }
    }

    Ok(())
}
