// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use lotcrawl::config::settings::{
    CrawlSettings, ErrorPolicy, ExtractSettings, HttpSettings, Settings, SiteSettings,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EVENT_ID: &str = "4821";

/// 模拟站点
///
/// 在 wiremock 上登记列表页和拍品页。
pub struct MockSite {
    pub server: MockServer,
}

impl MockSite {
    pub async fn start() -> Self {
        lotcrawl::utils::telemetry::try_init_telemetry();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    pub fn lot_url(&self, id: u32) -> String {
        format!("{}/Event/LotDetails/{}", self.server.uri(), id)
    }

    /// 登记列表页，`lot_ids` 为空时生成不含画廊单元的页面
    pub async fn listing(&self, page: u32, lot_ids: &[u32], last_page: u32) {
        let body = if lot_ids.is_empty() {
            "<html><body><p>There are no lots in this event.</p></body></html>".to_string()
        } else {
            listing_html(lot_ids, last_page)
        };
        Mock::given(method("GET"))
            .and(path(format!("/Event/Details/{}", EVENT_ID)))
            .and(query_param("page", page.to_string()))
            .respond_with(html(body))
            .mount(&self.server)
            .await;
    }

    pub async fn lot(&self, id: u32, title: &str, bid: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/Event/LotDetails/{}", id)))
            .respond_with(html(lot_html(id, title, bid)))
            .mount(&self.server)
            .await;
    }

    pub async fn failing_lot(&self, id: u32, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/Event/LotDetails/{}", id)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub fn settings(&self) -> Settings {
        Settings {
            site: SiteSettings {
                base_url: self.base_url(),
            },
            http: HttpSettings {
                user_agent: "lotcrawl-integration".to_string(),
                timeout_secs: Some(5),
            },
            crawl: CrawlSettings {
                concurrency: 1,
                on_error: ErrorPolicy::Abort,
                legacy_first_page_only: false,
            },
            extract: ExtractSettings {
                full_description: false,
            },
        }
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

fn listing_html(lot_ids: &[u32], last_page: u32) -> String {
    let units: String = lot_ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="galleryUnit">
  <a href="/Event/LotDetails/{id}"><img src="/img/{id}.jpg"></a>
  <a href="/Event/LotDetails/{id}">Lot {id}</a>
</div>"#
            )
        })
        .collect();
    let pager: String = (0..=last_page)
        .map(|p| format!(r#"<a href="/Event/Details/{EVENT_ID}?page={p}">{}</a>"#, p + 1))
        .collect();
    format!(r#"<html><body><div class="gallery">{units}</div><nav>{pager}</nav></body></html>"#)
}

fn lot_html(id: u32, title: &str, bid: &str) -> String {
    format!(
        r#"<html><body><main><div class="container"><div><div class="row">
  <div class="col-xs-12 col-md-7 detail__title__wrapper"><h3 class="detail__title">
    {title}
  </h3></div>
  <div class="col-xs-12 col-md-7">
    <div class="panel panel-default closed-details">
      <ul class="list-group">
        <li class="list-group-item">Current Bid: $<span class="NumberPart">{bid}</span> High Bidder: bidder{id}</li>
        <li class="list-group-item">2 Bid(s) so far</li>
      </ul>
    </div>
    <div class="panel panel-default detail__description-panel">
      <div class="panel-body description">Lot {id} sold as is</div>
    </div>
  </div>
</div></div></div>
<ul><li>Lot # {id}</li><li>System ID # 9{id}</li></ul>
<span class="awe-rt-startingDTTM" data-initial-dttm="2024-05-01 09:00"></span>
<span class="awe-rt-endingDTTM" data-initial-dttm="2024-05-08 19:00"></span>
</main></body></html>"#
    )
}
