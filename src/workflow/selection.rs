//! 待上传文件列表
//!
//! 新加入的文件追加到已有列表之后，直到显式清空。

use crate::models::upload::UploadFile;
use crate::services::file_validator::{validate_file, FileVerdict, RejectReason, SelectionLimits};
use crate::utils::format::format_megabytes;

/// 选择文件时产生的提示（不会中断流程）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionWarning {
    /// 类型不支持的文件
    UnsupportedFiles { names: Vec<String> },
    /// 超过大小上限的文件
    FileTooLarge { name: String, limit: u64 },
    /// 加入后会超过数量上限，整批被拒绝
    TooManyFiles { max_files: usize },
}

impl std::fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionWarning::UnsupportedFiles { names } => write!(
                f,
                "以下のファイルは対応していない形式です: {}",
                names.join(", ")
            ),
            SelectionWarning::FileTooLarge { name, limit } => write!(
                f,
                "ファイル \"{}\" がサイズ制限（{}）を超えています。",
                name,
                format_megabytes(*limit)
            ),
            SelectionWarning::TooManyFiles { max_files } => write!(
                f,
                "アップロードできるファイル数の上限（{}個）を超えています。",
                max_files
            ),
        }
    }
}

/// 一次添加的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// 实际加入列表的文件数
    pub accepted: usize,
    pub warnings: Vec<SelectionWarning>,
}

impl SelectionOutcome {
    /// 列表是否发生了变化
    pub fn changed(&self) -> bool {
        self.accepted > 0
    }
}

/// 待上传文件列表
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    files: Vec<UploadFile>,
    limits: SelectionLimits,
}

impl FileSelection {
    pub fn new(limits: SelectionLimits) -> Self {
        Self {
            files: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &SelectionLimits {
        &self.limits
    }

    /// 替换限制（例如配置加载完成后）；已选文件保持不变
    pub fn set_limits(&mut self, limits: SelectionLimits) {
        self.limits = limits;
    }

    /// 添加一批文件
    ///
    /// 类型或大小不合格的文件被剔除并给出提示；如果剩余文件加入后
    /// 会超过数量上限，整批都不加入。
    pub fn add_files(&mut self, incoming: Vec<UploadFile>) -> SelectionOutcome {
        let mut outcome = SelectionOutcome::default();
        let mut unsupported = Vec::new();
        let mut valid = Vec::new();

        for file in incoming {
            match validate_file(&file, &self.limits) {
                FileVerdict::Accepted => valid.push(file),
                FileVerdict::Rejected(RejectReason::UnsupportedType { .. }) => {
                    unsupported.push(file.name)
                }
                FileVerdict::Rejected(RejectReason::TooLarge { limit, .. }) => {
                    outcome.warnings.push(SelectionWarning::FileTooLarge {
                        name: file.name,
                        limit,
                    });
                }
            }
        }

        if self.files.len() + valid.len() > self.limits.max_files {
            outcome.warnings.push(SelectionWarning::TooManyFiles {
                max_files: self.limits.max_files,
            });
        } else {
            outcome.accepted = valid.len();
            self.files.extend(valid);
        }

        if !unsupported.is_empty() {
            outcome
                .warnings
                .push(SelectionWarning::UnsupportedFiles { names: unsupported });
        }

        outcome
    }

    /// 按索引移除文件，索引越界时返回 `None`
    pub fn remove(&mut self, index: usize) -> Option<UploadFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
