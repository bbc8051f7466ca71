use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::Input;

use crate::config;
use crate::models::{format_seconds, Track};
use crate::platforms::{self, PlatformKind};

#[derive(Parser)]
#[command(name = "nowplaying", about = "Spotify(stats.fm) / Yandex Music 현재 재생 곡 조회")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 지금 재생 중인 곡 표시
    Now {
        /// 조회할 플랫폼
        #[arg(value_enum)]
        platform: PlatformKind,
        /// 사용자명(Spotify) 또는 토큰(Yandex). 설정 파일보다 우선한다
        #[arg(long)]
        credential: Option<String>,
        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 자격증명 설정
    Config,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Now {
            platform,
            credential,
            json,
        }) => cmd_now(platform, credential, json),
        Some(Commands::Config) => cmd_config(),
        None => {
            println!("사용법: nowplaying <명령어>");
            println!("자세한 정보는 nowplaying --help를 실행하세요.");
            Ok(())
        }
    }
}

fn cmd_now(kind: PlatformKind, credential: Option<String>, json: bool) -> Result<()> {
    let cfg = config::load_config();

    let Some(credential) = resolve_credential(kind, credential, &cfg) else {
        println!("자격증명이 설정되지 않았습니다. 먼저 'nowplaying config'를 실행하거나 --credential을 지정하세요.");
        return Ok(());
    };

    let platform = platforms::create(kind, &cfg, &credential)?;
    let track = platform.get_track();

    if json {
        let out = serde_json::to_string_pretty(&track).context("트랙 JSON 변환에 실패했습니다")?;
        println!("{}", out);
        return Ok(());
    }

    if !track.active {
        println!("{}에서 재생 중인 곡이 없습니다.", platform.name());
        return Ok(());
    }

    println!("{}", track_table(&track));
    Ok(())
}

/// `--credential`이 설정 파일보다 우선한다. 공백뿐인 값은 없는 것으로 본다.
fn resolve_credential(kind: PlatformKind, flag: Option<String>, cfg: &config::Config) -> Option<String> {
    match flag.and_then(non_empty) {
        Some(c) => Some(c),
        None if kind.is_configured(cfg) => kind.configured_credential(cfg),
        None => None,
    }
}

fn track_table(track: &Track) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["항목", "값"]);

    let progress = match (track.progress, track.duration) {
        (Some(p), Some(d)) => format!("{} / {}", format_seconds(p), format_seconds(d)),
        (Some(p), None) => format_seconds(p),
        _ => "-".to_string(),
    };

    let rows = [
        ("제목", track.display_title().to_string()),
        ("아티스트", track.display_artist()),
        ("앨범", or_dash(&track.album)),
        ("진행", progress),
        ("링크", or_dash(&track.link)),
        ("앨범 아트", or_dash(&track.thumb)),
        ("기기", or_dash(&track.device)),
        ("다운로드", or_dash(&track.download_url)),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_config();

    println!("자격증명 설정 (비워 두면 해당 플랫폼을 사용하지 않습니다)\n");

    let username: String = Input::new()
        .with_prompt("stats.fm 사용자명 (Spotify)")
        .with_initial_text(cfg.spotify.username.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let token: String = Input::new()
        .with_prompt("Yandex Music 토큰")
        .with_initial_text(cfg.yandex.token.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    cfg.spotify.username = non_empty(username);
    cfg.yandex.token = non_empty(token);

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
