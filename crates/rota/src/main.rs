use rota::app::App;
use rota::config;
use rota::session::Session;
use rota::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let session = Session::new(config)?;

    let (tx, rx) = async_channel::bounded(32);

    // Single-threaded: the event loop is the only owner of the wheel
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        runtime::start_background_services(tx.clone());
        App::new(session, tx).run(rx).await;
    });

    Ok(())
}
