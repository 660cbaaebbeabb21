//! 界面状态 - 流程层
//!
//! 所有状态变化都经过 `update(state, event)`，它是纯函数：
//! 不发请求，只返回新状态和需要执行的副作用（`Effect`）。
//!
//! 每次提交都会递增 `generation`，只有与最新一代匹配的响应才会被应用，
//! 被新提交取代的旧请求即使后返回也不会覆盖结果。

use crate::models::api::{CheckResponse, ServiceConfig};
use crate::models::upload::UploadFile;
use crate::services::file_validator::SelectionLimits;
use tracing::debug;

/// 配置加载失败时的固定提示
pub const CONFIG_ERROR_MESSAGE: &str =
    "設定の読み込みに失敗しました。バックエンドサーバーが起動していることを確認してください。";

/// 检查请求失败时的固定提示
pub const CHECK_ERROR_MESSAGE: &str =
    "ドキュメントのチェックに失敗しました。ファイル形式やサイズを確認してください。";

/// 错误来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorKind {
    Config,
    Check,
}

/// 面向用户的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub kind: UiErrorKind,
    pub message: &'static str,
}

impl UiError {
    pub fn config() -> Self {
        Self {
            kind: UiErrorKind::Config,
            message: CONFIG_ERROR_MESSAGE,
        }
    }

    pub fn check() -> Self {
        Self {
            kind: UiErrorKind::Check,
            message: CHECK_ERROR_MESSAGE,
        }
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

/// 界面状态
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub config: Option<ServiceConfig>,
    pub is_loading: bool,
    pub is_checking: bool,
    pub check_results: Option<CheckResponse>,
    pub error: Option<UiError>,
    pub selected_files: Vec<UploadFile>,
    /// 最近一次提交的代号
    pub generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            config: None,
            is_loading: true,
            is_checking: false,
            check_results: None,
            error: None,
            selected_files: Vec::new(),
            generation: 0,
        }
    }
}

impl ViewState {
    /// 是否显示文件选择区域
    ///
    /// 配置加载失败的提示未被重置前不显示。
    pub fn shows_upload_widget(&self) -> bool {
        !self.is_loading
            && !self.is_checking
            && self.check_results.is_none()
            && !matches!(
                self.error,
                Some(UiError {
                    kind: UiErrorKind::Config,
                    ..
                })
            )
    }

    /// 当前生效的校验限制，配置缺失时使用默认值
    pub fn effective_limits(&self) -> SelectionLimits {
        SelectionLimits::from_optional(self.config.as_ref())
    }
}

/// 驱动状态变化的事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ConfigLoaded(ServiceConfig),
    ConfigFailed,
    /// 用户选择的文件列表（替换当前列表）
    FilesSelected(Vec<UploadFile>),
    CheckSucceeded {
        generation: u64,
        response: CheckResponse,
    },
    CheckFailed {
        generation: u64,
    },
    Reset,
}

/// 需要调用方执行的副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// 把文件提交到后端检查
    SubmitFiles {
        generation: u64,
        files: Vec<UploadFile>,
    },
}

/// 状态转换函数
pub fn update(mut state: ViewState, event: Event) -> (ViewState, Option<Effect>) {
    match event {
        Event::ConfigLoaded(config) => {
            state.config = Some(config);
            state.is_loading = false;
            (state, None)
        }
        Event::ConfigFailed => {
            state.error = Some(UiError::config());
            state.is_loading = false;
            (state, None)
        }
        Event::FilesSelected(files) => {
            state.selected_files = files;

            if state.selected_files.is_empty() {
                state.check_results = None;
                return (state, None);
            }

            state.generation += 1;
            state.is_checking = true;
            state.error = None;
            state.check_results = None;

            let effect = Effect::SubmitFiles {
                generation: state.generation,
                files: state.selected_files.clone(),
            };
            (state, Some(effect))
        }
        Event::CheckSucceeded {
            generation,
            response,
        } => {
            if generation != state.generation {
                debug!(
                    "丢弃过期的检查结果: 第 {} 代 (当前第 {} 代)",
                    generation, state.generation
                );
                return (state, None);
            }
            state.check_results = Some(response);
            state.is_checking = false;
            (state, None)
        }
        Event::CheckFailed { generation } => {
            if generation != state.generation {
                debug!(
                    "忽略过期请求的失败: 第 {} 代 (当前第 {} 代)",
                    generation, state.generation
                );
                return (state, None);
            }
            state.error = Some(UiError::check());
            state.is_checking = false;
            (state, None)
        }
        Event::Reset => {
            state.check_results = None;
            state.error = None;
            state.selected_files.clear();
            (state, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::{FileCheckResult, FileStatus};

    fn config() -> ServiceConfig {
        ServiceConfig {
            max_file_size: 52_428_800,
            max_files_count: 5,
            supported_extensions: vec![".docx".to_string(), ".pdf".to_string()],
            log_level: "INFO".to_string(),
            max_sentence_length: None,
        }
    }

    fn response(name: &str) -> CheckResponse {
        CheckResponse {
            total_files: 1,
            processed_files: 1,
            results: vec![FileCheckResult {
                filename: name.to_string(),
                status: FileStatus::Success,
                text_length: None,
                character_count: Some(10),
                line_count: Some(1),
                word_count: Some(2),
                issues: vec![],
                error_message: None,
                extra: Default::default(),
            }],
            extra: Default::default(),
        }
    }

    fn files(names: &[&str]) -> Vec<UploadFile> {
        names
            .iter()
            .map(|n| UploadFile::from_bytes(*n, vec![1, 2, 3]))
            .collect()
    }

    fn ready() -> ViewState {
        update(ViewState::default(), Event::ConfigLoaded(config())).0
    }

    #[test]
    fn test_config_loaded_enables_upload() {
        let state = ready();
        assert!(!state.is_loading);
        assert!(state.shows_upload_widget());
        assert_eq!(state.effective_limits().max_files, 5);
    }

    #[test]
    fn test_config_failure_hides_upload_until_reset() {
        let (state, effect) = update(ViewState::default(), Event::ConfigFailed);
        assert!(effect.is_none());
        assert_eq!(state.error, Some(UiError::config()));
        assert!(state.config.is_none());
        assert!(!state.shows_upload_widget());
        // 回退到内置默认限制
        assert_eq!(state.effective_limits(), SelectionLimits::default());

        let (state, _) = update(state, Event::Reset);
        assert!(state.error.is_none());
        assert!(state.shows_upload_widget());
    }

    #[test]
    fn test_selecting_files_emits_single_submit() {
        let (state, effect) = update(ready(), Event::FilesSelected(files(&["a.docx", "b.pdf"])));

        assert!(state.is_checking);
        assert!(!state.shows_upload_widget());
        assert_eq!(
            effect,
            Some(Effect::SubmitFiles {
                generation: 1,
                files: files(&["a.docx", "b.pdf"]),
            })
        );
    }

    #[test]
    fn test_empty_selection_clears_results_without_submit() {
        let (state, _) = update(ready(), Event::FilesSelected(files(&["a.docx"])));
        let (state, _) = update(
            state,
            Event::CheckSucceeded {
                generation: 1,
                response: response("a.docx"),
            },
        );
        assert!(state.check_results.is_some());

        let (state, effect) = update(state, Event::FilesSelected(vec![]));
        assert!(effect.is_none());
        assert!(state.check_results.is_none());
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_submit_clears_previous_error_and_results() {
        let (state, _) = update(ready(), Event::FilesSelected(files(&["a.docx"])));
        let (state, _) = update(state, Event::CheckFailed { generation: 1 });
        assert_eq!(state.error, Some(UiError::check()));
        assert!(!state.is_checking);
        // 检查失败后回到可上传状态
        assert!(state.shows_upload_widget());

        let (state, effect) = update(state, Event::FilesSelected(files(&["a.docx"])));
        assert!(state.error.is_none());
        assert!(state.check_results.is_none());
        assert!(matches!(effect, Some(Effect::SubmitFiles { generation: 2, .. })));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let (state, _) = update(ready(), Event::FilesSelected(files(&["old.docx"])));
        let (state, _) = update(state, Event::FilesSelected(files(&["new.docx"])));
        assert_eq!(state.generation, 2);

        // 旧请求后返回
        let (state, _) = update(
            state,
            Event::CheckSucceeded {
                generation: 1,
                response: response("old.docx"),
            },
        );
        assert!(state.check_results.is_none());
        assert!(state.is_checking);

        let (state, _) = update(state, Event::CheckFailed { generation: 1 });
        assert!(state.error.is_none());

        let (state, _) = update(
            state,
            Event::CheckSucceeded {
                generation: 2,
                response: response("new.docx"),
            },
        );
        assert_eq!(
            state.check_results.unwrap().results[0].filename,
            "new.docx"
        );
    }

    #[test]
    fn test_reset_keeps_config() {
        let (state, _) = update(ready(), Event::FilesSelected(files(&["a.docx"])));
        let (state, _) = update(
            state,
            Event::CheckSucceeded {
                generation: 1,
                response: response("a.docx"),
            },
        );
        let (state, _) = update(state, Event::Reset);

        assert!(state.check_results.is_none());
        assert!(state.selected_files.is_empty());
        assert!(state.config.is_some());
        assert!(state.shows_upload_widget());
    }
}
