//! Interface language.

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::StorageError;
use crate::traits::{keys, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    ZhCn,
    EnUs,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "zh-CN" => Some(Locale::ZhCn),
            "en-US" => Some(Locale::EnUs),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Locale::ZhCn => Locale::EnUs,
            Locale::EnUs => Locale::ZhCn,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (key, zh-CN, en-US)
const LABELS: &[(&str, &str, &str)] = &[
    ("id", "ID", "ID"),
    ("name", "名称", "Name"),
    ("ip", "IP 地址", "IP"),
    ("hostname", "主机名", "Hostname"),
    ("os", "操作系统", "OS"),
    ("device_type", "设备类型", "Device"),
    ("source", "来源", "Source"),
    ("status", "状态", "Status"),
    ("progress", "进度", "Progress"),
    ("tags", "标签", "Tags"),
    ("color", "颜色", "Color"),
    ("description", "描述", "Description"),
    ("hosts", "主机数", "Hosts"),
    ("type", "类型", "Type"),
    ("address", "地址", "Address"),
    ("username", "用户名", "Username"),
    ("email", "邮箱", "Email"),
    ("role", "角色", "Role"),
    ("target", "扫描目标", "Target"),
    ("results", "结果数", "Results"),
    ("created_at", "创建时间", "Created"),
    ("collected_at", "采集时间", "Collected"),
    ("error", "错误信息", "Error"),
    ("graph_nodes", "拓扑节点数", "Graph nodes"),
    ("scanning", "正在扫描", "Scanning"),
    ("total", "共", "Total"),
    ("page", "页", "Page"),
    ("empty", "暂无数据", "No data"),
    ("scan_concurrent", "扫描并发数", "Scan concurrency"),
    ("collect_concurrent", "采集并发数", "Collection concurrency"),
    ("page_size", "默认每页条数", "Default page size"),
    ("language", "语言", "Language"),
];

/// Current language, persisted under `locale`.
pub struct LocaleStore {
    storage: Arc<dyn Storage>,
    current: RwLock<Locale>,
}

impl LocaleStore {
    /// Restore the persisted locale; unknown or unreadable values give `zh-CN`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let locale = match storage.get(keys::LOCALE) {
            Ok(Some(value)) => Locale::parse(&value).unwrap_or_default(),
            Ok(None) => Locale::default(),
            Err(err) => {
                warn!(error = %err, "could not read stored locale");
                Locale::default()
            }
        };
        Self {
            storage,
            current: RwLock::new(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Switch language. The in-memory value changes even if persisting fails.
    pub fn set_locale(&self, locale: Locale) -> Result<(), StorageError> {
        match self.current.write() {
            Ok(mut guard) => *guard = locale,
            Err(poisoned) => *poisoned.into_inner() = locale,
        }
        self.storage.set(keys::LOCALE, locale.as_str())
    }

    /// Flip between the two languages and return the new one.
    pub fn toggle_locale(&self) -> Result<Locale, StorageError> {
        let next = self.locale().other();
        self.set_locale(next)?;
        Ok(next)
    }

    /// CLI label for `key` in the current language; unknown keys come back as-is.
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        let locale = self.locale();
        LABELS
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, zh, en)| match locale {
                Locale::ZhCn => *zh,
                Locale::EnUs => *en,
            })
            .unwrap_or(key)
    }
}
