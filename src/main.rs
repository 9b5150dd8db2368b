mod config;
mod error;
mod images;
mod logging;
mod models;
mod storage;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::{Cli, Config};
use crate::images::ImageLoader;
use crate::storage::load_feed;
use crate::ui::view::theme;
use crate::ui::{Action, App, render};

/// 事件轮询间隔，同时也是淡入淡出的节拍
const TICK_RATE: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli).context("loading configuration")?;
    let _log_guard = logging::init_logging(&config.log_dir, &config.log_level)?;
    tracing::info!(
        feed = %config.feed_path.display(),
        image_cache = config.image_cache,
        "starting"
    );

    // 加载 feed
    let feed = load_feed(&config.feed_path).context("loading feed")?;

    // 缩略图在独立的运行时上抓取
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("briefing-images")
        .enable_all()
        .build()
        .context("starting image runtime")?;
    let mut loader = ImageLoader::new(
        runtime.handle().clone(),
        config.cache_dir.clone(),
        u32::from(theme::THUMBNAIL_SIZE),
        config.image_timeout,
    )
    .context("creating image loader")?;

    // 创建应用状态
    let mut app = App::new(feed, config.feed_path.clone(), config.image_cache);

    // 设置终端，guard 离开作用域时恢复
    let terminal_guard = enter_with(enter_terminal, restore_terminal)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &mut loader);
    drop(terminal_guard);

    runtime.shutdown_background();
    tracing::info!("exiting");

    result.context("terminal event loop")
}

/// drop 时执行恢复动作
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// 先装好恢复动作再执行 setup，setup 中途失败也会恢复
fn enter_with<F: FnMut()>(
    setup: impl FnOnce() -> io::Result<()>,
    restore: F,
) -> io::Result<RestoreGuard<F>> {
    let guard = RestoreGuard { restore };
    setup()?;
    Ok(guard)
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    );
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    loader: &mut ImageLoader,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render(f, app))?;

        // 只为上一帧可见的行请求缩略图
        for (id, request) in app.pending_image_requests() {
            loader.request(id, request);
        }

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? && ui::handle_event(app, event::read()?) {
            break;
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.dispatch(Action::Tick);
            last_tick = Instant::now();
        }

        while let Some(response) = loader.try_recv() {
            app.apply_image(response);
        }
    }
    Ok(())
}
