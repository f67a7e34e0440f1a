/// Generates the constructor and the list/create/read/update methods shared by
/// every resource client. Each method is instrumented and simply forwards to
/// the inner [`ResourceClient`](crate::actor_framework::ResourceClient).
macro_rules! impl_resource_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural_snake>](
                    &self,
                ) -> Result<$crate::pipeline::Reply<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await
                }

                #[tracing::instrument(skip(self, body))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    body: serde_json::Value,
                ) -> Result<$crate::pipeline::Reply<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.create(body).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<read_ $entity_name_snake>](
                    &self,
                    id: String,
                ) -> Result<$crate::pipeline::Reply<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.read(id).await
                }

                #[tracing::instrument(skip(self, body))]
                pub async fn [<update_ $entity_name_snake>](
                    &self,
                    id: String,
                    body: serde_json::Value,
                ) -> Result<$crate::pipeline::Reply<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, body).await
                }
            }
        }
    };
}
