//! 检查结果展示 - 业务能力层
//!
//! 对 `CheckResponse` 做只读的统计和渲染，不修改结果本身

use crate::models::api::{CheckIssue, CheckResponse, FileCheckResult, Severity};
use std::fmt::Write;

/// 结果汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub total_files: usize,
    pub processed_files: usize,
    pub successful_files: usize,
    pub error_files: usize,
    pub total_issues: usize,
}

impl CheckSummary {
    /// 线性扫描一次结果列表得到各项统计
    pub fn from_response(response: &CheckResponse) -> Self {
        let mut summary = Self {
            total_files: response.total_files,
            processed_files: response.processed_files,
            ..Default::default()
        };

        for result in &response.results {
            summary.total_issues += result.issues.len();
            if result.is_success() {
                summary.successful_files += 1;
            } else {
                summary.error_files += 1;
            }
        }

        summary
    }
}

/// 严重程度对应的颜色和图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

pub fn severity_style(severity: &Severity) -> SeverityStyle {
    match severity {
        Severity::Error => SeverityStyle {
            color: "#dc3545",
            icon: "❌",
        },
        Severity::Warning => SeverityStyle {
            color: "#ffc107",
            icon: "⚠️",
        },
        Severity::Info => SeverityStyle {
            color: "#17a2b8",
            icon: "ℹ️",
        },
        Severity::Other(_) => SeverityStyle {
            color: "#6c757d",
            icon: "📝",
        },
    }
}

/// 渲染完整的检查结果
pub fn render_results(response: &CheckResponse) -> String {
    let summary = CheckSummary::from_response(response);
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "チェック結果");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "総ファイル数: {}", summary.total_files);
    let _ = writeln!(out, "処理済み: {}", summary.processed_files);
    let _ = writeln!(out, "成功: {}", summary.successful_files);
    let _ = writeln!(out, "エラー: {}", summary.error_files);
    let _ = writeln!(out, "総問題数: {}", summary.total_issues);

    for result in &response.results {
        let _ = writeln!(out, "{}", "─".repeat(60));
        render_file_card(&mut out, result);
    }

    out
}

fn render_file_card(out: &mut String, result: &FileCheckResult) {
    let badge = if result.is_success() {
        "✅ 成功"
    } else {
        "❌ エラー"
    };
    let _ = writeln!(out, "{}  [{}]", result.filename, badge);

    if result.is_success() {
        let _ = writeln!(
            out,
            "  文字数: {} | 行数: {} | 単語数: {} | 問題数: {}",
            display_count(result.character_count),
            display_count(result.line_count),
            display_count(result.word_count),
            result.issues.len()
        );
    } else if let Some(message) = &result.error_message {
        let _ = writeln!(out, "  エラー: {}", message);
    }

    for issue in &result.issues {
        render_issue(out, issue);
    }

    if result.is_success() && result.issues.is_empty() {
        let _ = writeln!(out, "  ✨ 問題は見つかりませんでした！");
    }
}

fn render_issue(out: &mut String, issue: &CheckIssue) {
    let style = severity_style(&issue.severity);
    let _ = writeln!(
        out,
        "  {} {} 行 {}: {}",
        style.icon, issue.issue_type, issue.line, issue.message
    );
    if let Some(suggestion) = &issue.suggestion {
        let _ = writeln!(out, "     💡 提案: {}", suggestion);
    }
    let _ = writeln!(out, "     ルール: {}", issue.rule);
}

fn display_count(count: Option<u64>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
}
