//! 后端 URL 构建工具

/// 后端接口前缀
const API_PREFIX: &str = "/api/system-design";

/// 后端端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// 问题列表
    Questions,
    /// 设计方案
    Options,
    /// 部署
    Deploy,
}

impl Endpoint {
    /// 端点相对于接口前缀的路径
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Questions => "/questions",
            Endpoint::Options => "/options",
            Endpoint::Deploy => "/deploy",
        }
    }
}

/// 修复 base_url
///
/// - 移除末尾斜杠
/// - 修复双斜杠（保留协议部分）
pub fn fix_base_url(base_url: &str) -> String {
    let mut url = base_url.trim().trim_end_matches('/').to_string();

    // 修复双斜杠（跳过协议部分）
    if let Some(pos) = url.find("://") {
        let (protocol, rest) = url.split_at(pos + 3);
        let fixed_rest = rest.replace("//", "/");
        url = format!("{}{}", protocol, fixed_rest);
    }

    url
}

/// 构建完整端点 URL
///
/// base_url 可以是后端根地址，也可以已经包含 `/api/system-design`
pub fn build_endpoint(base_url: &str, endpoint: Endpoint) -> String {
    let url = fix_base_url(base_url);

    if url.ends_with(API_PREFIX) {
        format!("{}{}", url, endpoint.path())
    } else {
        format!("{}{}{}", url, API_PREFIX, endpoint.path())
    }
}
