use game_core::GameEvent;
use game_types::{ConfidenceBand, GameSnapshot, GameStatus, GuessRecord};

pub fn render_status(snapshot: &GameSnapshot) -> String {
    let state = match snapshot.status {
        GameStatus::Idle => "准备开始",
        GameStatus::Playing => "进行中",
        GameStatus::Won => "AI猜对了",
        GameStatus::Lost => "时间到",
    };

    let mut line = format!(
        "[第 {} 回合] {} | 得分 {} | 剩余 {}s{} | 绘画进度 {}%",
        snapshot.round_number,
        state,
        snapshot.score,
        snapshot.time_remaining,
        if snapshot.time_is_low { "!" } else { "" },
        snapshot.drawing_progress,
    );

    if let Some(category) = snapshot.category {
        let word = snapshot.word.as_deref().unwrap_or("🔒");
        line.push_str(&format!(
            " | 题目 ({}, {} 字): {}",
            category.label(),
            snapshot.word_length,
            word
        ));
    }
    if snapshot.guess_count > 0 {
        line.push_str(&format!(" | AI已猜测 {} 次", snapshot.guess_count));
    }
    line
}

pub fn render_guess(record: &GuessRecord) -> String {
    let marker = match (record.is_correct, record.confidence_band()) {
        (true, _) => "✅",
        (false, ConfidenceBand::High) => "🟢",
        (false, ConfidenceBand::Medium) => "🟡",
        (false, ConfidenceBand::Low) => "⚪",
    };
    format!("{} AI猜: {} ({}% 确信)", marker, record.guess, record.confidence)
}

/// One line per event worth showing; stroke-level progress is skipped.
pub fn render_event(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::RoundStarted {
            round_number,
            category,
            word_length,
            ..
        } => format!(
            "第 {} 回合开始: 请画出一个{} ({} 个字), 输入 v 查看题目",
            round_number,
            category.label(),
            word_length
        ),
        GameEvent::DrawProgress { .. } => return None,
        GameEvent::GuessMade { record, .. } => render_guess(record),
        GameEvent::RoundWon {
            word,
            points_awarded,
            score,
            ..
        } => format!(
            "🎉 AI猜对了! 答案: {} | +{} 分, 总分 {}",
            word, points_awarded, score
        ),
        GameEvent::RoundLost { word, .. } => format!("⏰ 时间到! 正确答案: {}", word),
        GameEvent::HintRevealed { hint, score, .. } => {
            format!("💡 提示: {} (得分 {})", hint, score)
        }
        GameEvent::WordRevealed { word, .. } => format!("题目: {}", word),
        GameEvent::GameReset => "游戏已重置".to_string(),
    };
    Some(line)
}
