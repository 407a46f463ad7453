pub mod handlers {
    use actix_multipart::Multipart;
    use actix_web::{web, Error, HttpResponse, Responder};
    use log::{debug, info, warn};

    use crate::multipart::multipart::read_book_form;
    use crate::store::store::BookStore;
    use crate::uploads::uploads::ImageStore;
    use crate::validation::validation::{validate_create, validate_update, IMAGE_REQUIRED};
    use crate::{CatalogError, Status};

    fn log_not_found(book_id: &str, err: CatalogError) -> CatalogError {
        if let CatalogError::NotFound(_) = err {
            warn!("book {} not found", book_id);
        }
        err
    }

    pub async fn status() -> impl Responder {
        HttpResponse::Ok().json(Status {
            status: "ok".to_string(),
        })
    }

    pub async fn add_book(
        payload: Multipart,
        store: web::Data<dyn BookStore>,
        images: web::Data<ImageStore>,
    ) -> Result<HttpResponse, Error> {
        let form = read_book_form(payload).await?;
        let fields = validate_create(&form)?;

        let image = form
            .image
            .as_ref()
            .ok_or_else(|| CatalogError::invalid("image", IMAGE_REQUIRED))?;
        let filename = images.save(image).await?;

        let new_book = store.insert(fields.with_image(filename)).await?;
        info!("created book {} ({})", new_book.id, new_book.name);

        Ok(HttpResponse::Created().json(new_book))
    }

    pub async fn get_books(store: web::Data<dyn BookStore>) -> Result<HttpResponse, Error> {
        let all_books = store.list().await?;
        debug!("listing {} books", all_books.len());

        Ok(HttpResponse::Ok().json(all_books))
    }

    pub async fn get_book_id(
        path: web::Path<String>,
        store: web::Data<dyn BookStore>,
    ) -> Result<HttpResponse, Error> {
        let book_id = path.into_inner();
        let book = store
            .get(&book_id)
            .await
            .map_err(|e| log_not_found(&book_id, e))?;
        debug!("fetched book {}", book.id);

        Ok(HttpResponse::Ok().json(book))
    }

    pub async fn update_book(
        path: web::Path<String>,
        payload: Multipart,
        store: web::Data<dyn BookStore>,
        images: web::Data<ImageStore>,
    ) -> Result<HttpResponse, Error> {
        let book_id = path.into_inner();
        let form = read_book_form(payload).await?;
        let mut patch = validate_update(&form)?;

        // fail before touching the upload dir when the id is unknown
        store
            .get(&book_id)
            .await
            .map_err(|e| log_not_found(&book_id, e))?;

        if let Some(image) = &form.image {
            patch.image = Some(images.save(image).await?);
        }

        let book = store
            .update(&book_id, patch)
            .await
            .map_err(|e| log_not_found(&book_id, e))?;
        info!("updated book {}", book.id);

        Ok(HttpResponse::Ok().json(book))
    }

    pub async fn delete_book(
        path: web::Path<String>,
        store: web::Data<dyn BookStore>,
    ) -> Result<HttpResponse, Error> {
        let book_id = path.into_inner();
        store
            .delete(&book_id)
            .await
            .map_err(|e| log_not_found(&book_id, e))?;
        info!("deleted book {}", book_id);

        Ok(HttpResponse::Ok().finish())
    }

    /// Route table for the book resource and the health check.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(status))
            .service(
                web::resource("/books{_:/?}")
                    .route(web::post().to(add_book))
                    .route(web::get().to(get_books)),
            )
            .service(
                web::resource("/books/{book_id}")
                    .route(web::get().to(get_book_id))
                    .route(web::put().to(update_book))
                    .route(web::delete().to(delete_book)),
            );
    }

}
