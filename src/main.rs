use anyhow::Result;
use lichen::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::default();
    let engine: Box<dyn StepEngine> = if std::env::args().any(|arg| arg == "--gpu") {
        match GpuStepEngine::new() {
            Ok(engine) => Box::new(engine),
            Err(err) => {
                log::warn!("GPU backend unavailable ({err}); falling back to CPU");
                Box::new(CpuStepEngine::new())
            }
        }
    } else {
        Box::new(CpuStepEngine::new())
    };

    let app = LichenApp::new(settings, engine)?;
    app.run();
    Ok(())
}
