//! Demo: arma un pipeline de ejemplo, lo interpola, lo firma con la clave
//! configurada en el entorno y verifica el resultado.
//!
//! `PIPESIGN_SECRET=alpacas RUST_LOG=debug cargo run --bin pipesign-demo`

use std::process::ExitCode;

use log::{error, info};
use pipesign::config::init_dotenv;
use pipesign::{CommandStep, Env, LeafInterpolator, Pipeline, Plugin, SigningConfig, Steps};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn substitute(env: &Env, input: &str) -> Result<String, String> {
    let mut out = input.to_string();
    for (k, v) in env {
        out = out.replace(&format!("${{{k}}}"), v);
    }
    if out.contains("${") {
        return Err(format!("variable sin resolver en {input:?}"));
    }
    Ok(out)
}

fn sample_pipeline() -> Pipeline {
    let env: Env = [("DEPLOY_TARGET", "production"), ("IMAGE_TAG", "v1.4.2")].into_iter()
                                                                                .map(|(k, v)| (k.to_string(), v.to_string()))
                                                                                .collect();
    let steps = Steps::new(vec![CommandStep::new("cargo test --workspace").with_label(":rust: test").into(),
                                CommandStep::new("./deploy.sh ${DEPLOY_TARGET}").with_label(":rocket: deploy")
                                                                                .with_env("RUST_BACKTRACE", "1")
                                                                                .with_plugin(Plugin::new("docker#v5.9.0",
                                                                                                         Some(json!({"image": "app:${IMAGE_TAG}"}))))
                                                                                .into()]);
    Pipeline::new(env, steps)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SigningConfig::from_env()?;
    info!("signing with {} (parallel={})", config.algorithm, config.parallel);
    let key = config.key();

    let mut pipeline = sample_pipeline();
    pipeline.interpolate(&LeafInterpolator::new(substitute))?;
    if config.parallel {
        pipeline.sign_parallel(&key)?;
    } else {
        pipeline.sign(&key)?;
    }
    pipeline.verify(&key, &config.verify_policy())?;
    info!("verified {} steps", pipeline.steps.len());

    println!("{}", serde_json::to_string_pretty(&pipeline)?);
    Ok(())
}

fn main() -> ExitCode {
    // .env antes del logger, para que RUST_LOG pueda venir de ahí.
    init_dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                             .with_target(false)
                             .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("pipesign-demo: {e}");
            ExitCode::FAILURE
        }
    }
}
