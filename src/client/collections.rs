use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    ServiceTitanClient,
    client::ID_CHUNK_SIZE,
    config::PageFailurePolicy,
    errors::Error,
    request::RequestOptions,
};

impl ServiceTitanClient {
    /// Fetches every page of a collection, following `hasMore`.
    ///
    /// Pages are requested with `page=1, 2, ...`, overriding any `page`
    /// already in `options`. A page that is not a JSON object ends the walk.
    /// A failed page is handled per the configured `PageFailurePolicy`.
    pub async fn get_all(&self, path: &str, options: &RequestOptions) -> Result<Vec<Value>, Error> {
        self.get_all_with_policy(path, options, self.settings.page_failure)
            .await
    }

    pub async fn get_all_with_policy(
        &self,
        path: &str,
        options: &RequestOptions,
        on_failure: PageFailurePolicy,
    ) -> Result<Vec<Value>, Error> {
        let mut options = options.clone();
        let mut collected = Vec::new();
        let mut page: u32 = 1;
        loop {
            options.set_query("page", page);
            let payload = match self.get(path, &options).await {
                Ok(payload) => payload,
                Err(err) => match on_failure {
                    PageFailurePolicy::Truncate => {
                        warn!(
                            path,
                            page,
                            rows = collected.len(),
                            error = %err,
                            "page request failed; returning rows collected so far"
                        );
                        break;
                    }
                    PageFailurePolicy::Propagate => {
                        return Err(Error::Pagination {
                            page,
                            collected,
                            source: Box::new(err),
                        });
                    }
                },
            };
            if !payload.is_object() {
                debug!(path, page, "page is not a JSON object; stopping");
                break;
            }
            collected.extend(payload.data());
            if !payload.has_more() {
                break;
            }
            page += 1;
        }
        info!(path, pages = page, rows = collected.len(), "collection fetched");
        Ok(collected)
    }

    /// Fetches rows for `ids` in chunks of 50, one request per chunk, with
    /// `filter_name` set to the comma-joined chunk. Rows come back in chunk
    /// order. An empty `ids` makes no request.
    pub async fn get_all_id_filter<S: AsRef<str>>(
        &self,
        path: &str,
        ids: &[S],
        filter_name: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, Error> {
        let mut options = options.clone();
        let mut collected = Vec::new();
        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let joined = chunk
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(",");
            options.set_query(filter_name, joined);
            let payload = self.get(path, &options).await?;
            if !payload.is_object() {
                warn!(path, chunk = chunk.len(), "id filter response is not a JSON object");
            }
            collected.extend(payload.data());
        }
        debug!(path, ids = ids.len(), rows = collected.len(), "id filter fetched");
        Ok(collected)
    }

    /// `get_all_id_filter` with the usual `ids` filter parameter.
    pub async fn get_by_ids<S: AsRef<str>>(
        &self,
        path: &str,
        ids: &[S],
        options: &RequestOptions,
    ) -> Result<Vec<Value>, Error> {
        self.get_all_id_filter(path, ids, "ids", options).await
    }
}
