use std::{path::Path, sync::Arc};

use routa::{
    camera::FlyCamera,
    cubemap::Cubemap,
    expect,
    renderer::{RenderContext, RendererSettings},
    routa_error, routa_info,
    scene::Scene,
    window::Window,
};

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(std::fs::File::create("routa.log")?)
        .apply()?;
    Ok(())
}

fn main() {
    expect!(setup_logger(), "Failed to set up logging");

    // Let's catch panic messages ourselves and output everywhere
    std::panic::set_hook(Box::new(|info| {
        let loc = if let Some(loc) = info.location() {
            format!("Panic at {}:{}!", loc.file(), loc.line())
        } else {
            String::from("Panic!")
        };
        let msg = format!("{} {}", loc, info);

        routa_error!("{}", msg);
        eprintln!("{}", msg);
    }));

    let settings = RendererSettings::default();

    let skybox = expect!(
        Cubemap::load(Path::new("assets/skybox")),
        "Couldn't load skybox"
    );

    let ctx = Arc::new(RenderContext::new(
        Scene::demo(),
        skybox,
        FlyCamera::default(),
        settings.path,
    ));
    let workers = ctx.spawn_workers(settings.worker_count);
    routa_info!("Spawned {} render workers", workers.len());

    let window = Window::new("routa", (1280, 960), ctx, workers);
    window.main_loop();
}
