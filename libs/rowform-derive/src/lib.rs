use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for row-convertible record types.
///
/// Generates `rowform::RowRecord` (the ordered field declaration plus
/// by-name field access) and `rowform::FieldValue` (so the type can be
/// nested in other records, directly or inside a `Vec`).
///
/// # Example
///
/// ```ignore
/// #[derive(RowRecord, Debug, Clone, PartialEq)]
/// #[row(rename_all = "camelCase")]
/// pub struct SinglyNestedDataTypes {
///     pub all_primitive_data_types: AllPrimitiveDataTypes,
///     pub all_primitive_data_types_list: Vec<AllPrimitiveDataTypes>,
/// }
/// ```
///
/// Container attributes: `name = "..."` (record name, defaults to the
/// struct name), `rename_all = "camelCase" | "PascalCase" | "snake_case"`.
/// Field attribute: `rename = "..."`.
///
/// Every field type must implement `rowform::FieldValue`. `Option<T>`
/// fields are nullable, all others mandatory.
#[proc_macro_derive(RowRecord, attributes(row))]
pub fn derive_row_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Clone, Copy)]
enum RenameRule {
    Camel,
    Pascal,
    Snake,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> Result<Self, syn::Error> {
        match lit.value().as_str() {
            "camelCase" => Ok(RenameRule::Camel),
            "PascalCase" => Ok(RenameRule::Pascal),
            "snake_case" => Ok(RenameRule::Snake),
            other => Err(syn::Error::new_spanned(
                lit,
                format!(
                    "unknown rename rule '{other}' (expected 'camelCase', 'PascalCase' or 'snake_case')"
                ),
            )),
        }
    }

    /// `name` is a snake_case field identifier.
    fn apply(self, name: &str) -> String {
        match self {
            RenameRule::Snake => name.to_string(),
            RenameRule::Pascal => name
                .split('_')
                .filter(|part| !part.is_empty())
                .map(capitalize)
                .collect(),
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(name);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => pascal,
                }
            }
        }
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "RowRecord does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "RowRecord only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "RowRecord only supports structs",
            ));
        }
    };

    // Parse #[row(...)] on the struct.
    let mut record_name = name.to_string();
    let mut rename_all: Option<RenameRule> = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("row") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                record_name = value.value();
            } else if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                rename_all = Some(RenameRule::parse(&value)?);
            } else {
                return Err(meta.error("unsupported row attribute (expected 'name' or 'rename_all')"));
            }
            Ok(())
        })?;
    }

    let mut declare_tokens = Vec::new();
    let mut read_tokens = Vec::new();
    let mut take_tokens = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let ty = &field.ty;

        // Parse #[row(...)] on the field.
        let mut rename: Option<String> = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("row") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                } else {
                    return Err(meta.error("unsupported row attribute (expected 'rename')"));
                }
                Ok(())
            })?;
        }

        let field_name = match (rename, rename_all) {
            (Some(explicit), _) => explicit,
            (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
            (None, None) => ident.unraw().to_string(),
        };

        declare_tokens.push(quote! {
            .field::<#ty>(#field_name)
        });
        read_tokens.push(quote! {
            #field_name => rowform::FieldValue::to_value(&self.#ident, __field.kind()),
        });
        take_tokens.push(quote! {
            #ident: __fields.take(#field_name)?,
        });
    }

    let expanded = quote! {
        impl rowform::RowRecord for #name {
            const NAME: &'static str = #record_name;

            fn declaration() -> rowform::TypeDeclaration {
                rowform::TypeDeclaration::new(#record_name)
                    #(#declare_tokens)*
            }

            fn read_field(
                &self,
                __field: &rowform::FieldDescriptor,
            ) -> ::std::result::Result<rowform::Value, rowform::ConversionError> {
                match __field.name() {
                    #(#read_tokens)*
                    _ => ::std::result::Result::Err(rowform::ConversionError::mismatch(
                        ::std::format!("{} has no field of that name", #record_name),
                    )),
                }
            }

            fn from_fields(
                __fields: &mut rowform::FieldReader,
            ) -> ::std::result::Result<Self, rowform::ConversionError> {
                ::std::result::Result::Ok(Self {
                    #(#take_tokens)*
                })
            }
        }

        impl rowform::FieldValue for #name {
            fn declared_type() -> rowform::DeclaredType {
                rowform::DeclaredType::Record(rowform::RecordRef::of::<Self>())
            }

            fn to_value(
                &self,
                __kind: &rowform::FieldKind,
            ) -> ::std::result::Result<rowform::Value, rowform::ConversionError> {
                rowform::convert::record_to_value(self, __kind)
            }

            fn from_value(
                __value: rowform::Value,
                __kind: &rowform::FieldKind,
            ) -> ::std::result::Result<Self, rowform::ConversionError> {
                rowform::convert::record_from_value(__value, __kind)
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::Camel.apply("an_integer"), "anInteger");
        assert_eq!(RenameRule::Camel.apply("all_primitive_data_types_list"), "allPrimitiveDataTypesList");
        assert_eq!(RenameRule::Camel.apply("instant"), "instant");
        assert_eq!(RenameRule::Pascal.apply("a_boolean"), "ABoolean");
        assert_eq!(RenameRule::Snake.apply("a_long"), "a_long");
    }
}
